//! FILENAME: persistence/src/report_writer.rs
//! Paints a canonical table into a formatted report workbook.
//!
//! Layout: title in A1, blank row 2, an Excel table from A3 with a totals
//! row. One worksheet, named after the category.

use std::path::Path;

use engine::{col_to_index, index_to_col};
use reshape_engine::{CanonicalTable, ReportSettings, TableValue};
use rust_xlsxwriter::{
    Color, Format, FormatBorder, Table, TableColumn, TableFunction, TableStyle, Workbook, Worksheet,
};

use crate::PersistenceError;

/// Zero-based row of the table header (A3).
pub const TABLE_HEADER_ROW: u32 = 2;
pub const TOTAL_LABEL: &str = "Итого";
const NUMBER_FORMAT: &str = "#,##0";
const MAX_SHEET_NAME: usize = 31;

/// Writes `table` to a new workbook at `path`, replacing any existing file.
pub fn write_report(table: &CanonicalTable, settings: &ReportSettings, path: &Path) -> Result<(), PersistenceError> {
    if table.is_empty() {
        return Err(PersistenceError::EmptyReport);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(&settings.category))?;
    worksheet.set_screen_gridlines(false);

    worksheet.write_string_with_format(0, 0, settings.title(), &title_format(&settings.table_header_style))?;
    write_table(worksheet, table, settings)?;
    worksheet.autofit();

    workbook.save(path)?;
    log::info!(
        target: "persistence::write",
        "wrote {} rows to {}",
        table.len(),
        path.display()
    );
    Ok(())
}

fn write_table(worksheet: &mut Worksheet, table: &CanonicalTable, settings: &ReportSettings) -> Result<(), PersistenceError> {
    let number = Format::new().set_num_format(NUMBER_FORMAT);
    let sum_from = summation_start(&settings.start_summation_column);

    let columns: Vec<TableColumn> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let mut spec = TableColumn::new().set_header(table.header(*column));
            if i == 0 {
                spec = spec.set_total_label(TOTAL_LABEL);
            } else if i as u32 >= sum_from {
                spec = spec.set_total_function(TableFunction::Sum).set_format(number.clone());
            }
            spec
        })
        .collect();

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = TABLE_HEADER_ROW + 1 + r as u32;
        for (c, column) in table.columns.iter().enumerate() {
            let col = c as u16;
            match table.value(row, *column) {
                TableValue::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
                TableValue::Integer(n) => {
                    worksheet.write_number_with_format(excel_row, col, n as f64, &number)?;
                }
                TableValue::Decimal(x) => {
                    worksheet.write_number_with_format(excel_row, col, x, &number)?;
                }
                TableValue::Empty => {}
            }
        }
    }

    let excel_table = Table::new()
        .set_name(&settings.table_display_name)
        .set_style(table_style(&settings.excel_table_style_name))
        .set_first_column(true)
        .set_banded_rows(true)
        .set_banded_columns(true)
        .set_total_row(true)
        .set_columns(&columns);

    let last_row = TABLE_HEADER_ROW + table.len() as u32 + 1;
    let last_col = (table.columns.len() - 1) as u16;
    worksheet.add_table(TABLE_HEADER_ROW, 0, last_row, last_col, &excel_table)?;
    log::debug!(
        target: "persistence::write",
        "table '{}' at A{}:{}{}",
        settings.table_display_name,
        TABLE_HEADER_ROW + 1,
        index_to_col(last_col as u32),
        last_row + 1
    );
    Ok(())
}

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`.
pub fn sheet_name(category: &str) -> String {
    let cleaned: String = category
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Отчет".to_string()
    } else {
        cleaned
    }
}

fn summation_start(letter: &str) -> u32 {
    col_to_index(letter).unwrap_or_else(|| {
        log::warn!(
            target: "persistence::write",
            "invalid summation column '{}', totals start at column B",
            letter
        );
        1
    })
}

/// Emulates the named cell styles of the Excel UI for the title cell.
fn title_format(style: &str) -> Format {
    let accent = Color::RGB(0x44546A);
    match style {
        "Headline 1" => Format::new()
            .set_bold()
            .set_font_size(15)
            .set_font_color(accent)
            .set_border_bottom(FormatBorder::Thick)
            .set_border_bottom_color(Color::RGB(0x4472C4)),
        "Headline 2" => Format::new()
            .set_bold()
            .set_font_size(13)
            .set_font_color(accent)
            .set_border_bottom(FormatBorder::Thick)
            .set_border_bottom_color(Color::RGB(0xA2B8E1)),
        "Title" => Format::new().set_font_size(18).set_font_color(accent),
        _ => Format::new().set_bold(),
    }
}

/// Built-in table style from its Excel name, e.g. "TableStyleLight9".
pub fn table_style(name: &str) -> TableStyle {
    let name = name.trim().trim_start_matches("TableStyle");
    let (family, number) = name.split_at(name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len()));
    let number: u8 = number.parse().unwrap_or(0);

    let style = match (family, number) {
        ("None", _) => Some(TableStyle::None),
        ("Light", n) => light_style(n),
        ("Medium", n) => medium_style(n),
        ("Dark", n) => dark_style(n),
        _ => None,
    };
    style.unwrap_or_else(|| {
        log::warn!(target: "persistence::write", "unknown table style '{}', using Light9", name);
        TableStyle::Light9
    })
}

fn light_style(n: u8) -> Option<TableStyle> {
    Some(match n {
        1 => TableStyle::Light1, 2 => TableStyle::Light2, 3 => TableStyle::Light3,
        4 => TableStyle::Light4, 5 => TableStyle::Light5, 6 => TableStyle::Light6,
        7 => TableStyle::Light7, 8 => TableStyle::Light8, 9 => TableStyle::Light9,
        10 => TableStyle::Light10, 11 => TableStyle::Light11, 12 => TableStyle::Light12,
        13 => TableStyle::Light13, 14 => TableStyle::Light14, 15 => TableStyle::Light15,
        16 => TableStyle::Light16, 17 => TableStyle::Light17, 18 => TableStyle::Light18,
        19 => TableStyle::Light19, 20 => TableStyle::Light20, 21 => TableStyle::Light21,
        _ => return None,
    })
}

fn medium_style(n: u8) -> Option<TableStyle> {
    Some(match n {
        1 => TableStyle::Medium1, 2 => TableStyle::Medium2, 3 => TableStyle::Medium3,
        4 => TableStyle::Medium4, 5 => TableStyle::Medium5, 6 => TableStyle::Medium6,
        7 => TableStyle::Medium7, 8 => TableStyle::Medium8, 9 => TableStyle::Medium9,
        10 => TableStyle::Medium10, 11 => TableStyle::Medium11, 12 => TableStyle::Medium12,
        13 => TableStyle::Medium13, 14 => TableStyle::Medium14, 15 => TableStyle::Medium15,
        16 => TableStyle::Medium16, 17 => TableStyle::Medium17, 18 => TableStyle::Medium18,
        19 => TableStyle::Medium19, 20 => TableStyle::Medium20, 21 => TableStyle::Medium21,
        22 => TableStyle::Medium22, 23 => TableStyle::Medium23, 24 => TableStyle::Medium24,
        25 => TableStyle::Medium25, 26 => TableStyle::Medium26, 27 => TableStyle::Medium27,
        28 => TableStyle::Medium28,
        _ => return None,
    })
}

fn dark_style(n: u8) -> Option<TableStyle> {
    Some(match n {
        1 => TableStyle::Dark1, 2 => TableStyle::Dark2, 3 => TableStyle::Dark3,
        4 => TableStyle::Dark4, 5 => TableStyle::Dark5, 6 => TableStyle::Dark6,
        7 => TableStyle::Dark7, 8 => TableStyle::Dark8, 9 => TableStyle::Dark9,
        10 => TableStyle::Dark10, 11 => TableStyle::Dark11,
        _ => return None,
    })
}
