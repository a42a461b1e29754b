//! FILENAME: reshape-engine/src/config.rs
//! Display configuration handed to the report writer alongside a table.
//!
//! Each dialect has a built-in `RetailerConfig` preset; callers may replace
//! presets from a JSON overrides file keyed by dialect id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialect::DialectId;

fn default_header_style() -> String {
    "Headline 1".to_string()
}

/// Retailer-specific presentation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerConfig {
    pub company_name: String,
    /// Name of the Excel table object.
    pub table_display_name: String,
    /// Built-in Excel table style, e.g. "TableStyleLight9".
    pub excel_table_style_name: String,
    /// Column letter from which the totals row sums values.
    pub start_summation_column: String,
    #[serde(default = "default_header_style")]
    pub table_header_style: String,
}

impl RetailerConfig {
    fn new(company: &str, table: &str, style: &str, sum_from: &str) -> Self {
        RetailerConfig {
            company_name: company.to_string(),
            table_display_name: table.to_string(),
            excel_table_style_name: style.to_string(),
            start_summation_column: sum_from.to_string(),
            table_header_style: default_header_style(),
        }
    }

    /// Built-in preset for a dialect.
    pub fn preset(dialect: DialectId) -> Self {
        match dialect {
            DialectId::DnsNew => Self::new("ДНС", "DNS_data", "TableStyleLight9", "E"),
            DialectId::DnsExtended | DialectId::DnsLamp => {
                Self::new("ДНС", "DNS_data_extended", "TableStyleLight9", "F")
            }
            DialectId::DnsOld => Self::new("ДНС", "DNS_data", "TableStyleLight9", "F"),
            DialectId::Mvm => Self::new("МВМ", "MVM_data", "TableStyleLight10", "E"),
        }
    }
}

/// Per-run report parameters supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Already localized period text for the title, e.g. "01 июл 2025".
    pub report_period: String,
    /// Product category; also the worksheet name.
    pub category: String,
}

/// Flat record combining retailer and report parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub company_name: String,
    pub table_display_name: String,
    pub excel_table_style_name: String,
    pub start_summation_column: String,
    pub table_header_style: String,
    pub report_period: String,
    pub category: String,
}

impl ReportSettings {
    pub fn new(retailer: &RetailerConfig, report: &ReportConfig) -> Self {
        ReportSettings {
            company_name: retailer.company_name.clone(),
            table_display_name: retailer.table_display_name.clone(),
            excel_table_style_name: retailer.excel_table_style_name.clone(),
            start_summation_column: retailer.start_summation_column.clone(),
            table_header_style: retailer.table_header_style.clone(),
            report_period: report.report_period.clone(),
            category: report.category.clone(),
        }
    }

    /// "{category} в {company} - {period}"
    pub fn title(&self) -> String {
        format!("{} в {} - {}", self.category, self.company_name, self.report_period)
    }
}

/// Preset replacements keyed by dialect id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetailerOverrides(pub BTreeMap<DialectId, RetailerConfig>);

impl RetailerOverrides {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Override for `dialect`, or its preset.
    pub fn resolve(&self, dialect: DialectId) -> RetailerConfig {
        self.0.get(&dialect).cloned().unwrap_or_else(|| RetailerConfig::preset(dialect))
    }
}
