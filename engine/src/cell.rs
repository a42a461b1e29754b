//! FILENAME: engine/src/cell.rs
//! PURPOSE: Defines the scalar value held by a single cell of a raw grid.
//! CONTEXT: Retailer exports arrive as loosely typed spreadsheets. A cell is
//! read as-is (number, text, boolean, error or nothing) and interpreted later
//! by the reshape engine, so this type carries no header semantics.

use serde::{Deserialize, Serialize};

/// The value of one cell exactly as the spreadsheet reader produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Spreadsheet error literal such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Convenience constructor used heavily by fixtures.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for `Empty` and for text that is blank after trimming.
    /// Exported sheets often contain cells holding only spaces.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text content, or `None` for any non-text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// True when the cell is text equal to `label` after trimming.
    pub fn is_label(&self, label: &str) -> bool {
        self.as_text().map(|s| s == label).unwrap_or(false)
    }

    /// Numeric interpretation of the cell.
    ///
    /// Numbers pass through, text is parsed after stripping spaces
    /// (including non-breaking ones used as thousands separators) and
    /// accepting a decimal comma. Everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Returns the display value of the cell as a String.
    /// Whole numbers are printed without a fractional part so that codes
    /// stored as numbers compare equal to the same codes stored as text.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
