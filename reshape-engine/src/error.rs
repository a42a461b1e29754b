//! FILENAME: reshape-engine/src/error.rs

use thiserror::Error;

/// Failure of one dialect attempt on one grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialectError {
    /// Mandatory product-identity labels were not found in the header row.
    #[error("missing required product fields {labels:?} in header row {row}")]
    MissingRequiredField { labels: Vec<String>, row: u32 },

    /// An anchor section was not where the dialect expects it.
    #[error("structure mismatch: expected {expected}, found {found}")]
    StructureMismatch { expected: String, found: String },

    /// The header parsed but no store sections were discovered.
    #[error("no store sections found in header row {row}")]
    NoStoresFound { row: u32 },

    /// The grid holds no cells at all.
    #[error("input grid is empty")]
    EmptyInput,
}

impl DialectError {
    /// Field-resolution failures: the upload may be a sibling sub-variant.
    pub fn is_field_resolution(&self) -> bool {
        matches!(self, DialectError::MissingRequiredField { .. })
    }

    /// Lookup failures worth one retry with a different header offset.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            DialectError::MissingRequiredField { .. } | DialectError::StructureMismatch { .. }
        )
    }
}
