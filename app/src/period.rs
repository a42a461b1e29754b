//! FILENAME: app/src/period.rs
// PURPOSE: Report period text shown in the report title.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec").expect("month pattern is valid")
});

fn russian_month(english: &str) -> Option<&'static str> {
    Some(match english.to_ascii_lowercase().as_str() {
        "jan" => "янв",
        "feb" => "фев",
        "mar" => "мар",
        "apr" => "апр",
        "may" => "май",
        "jun" => "июн",
        "jul" => "июл",
        "aug" => "авг",
        "sep" => "сен",
        "oct" => "окт",
        "nov" => "ноя",
        "dec" => "дек",
        _ => return None,
    })
}

/// Replaces the first English month abbreviation in `s` with the Russian one.
pub fn localize_month(s: &str) -> String {
    MONTH_PATTERN
        .replace(s, |caps: &regex::Captures| {
            let matched = &caps[0];
            russian_month(matched).unwrap_or(matched).to_string()
        })
        .into_owned()
}

/// "01 июл 2025" for 2025-07-01.
pub fn format_report_period(date: NaiveDate) -> String {
    localize_month(&date.format("%d %b %Y").to_string())
}
