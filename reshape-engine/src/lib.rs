//! FILENAME: reshape-engine/src/lib.rs
//! Structure inference and reshape for retailer spreadsheet exports.
//!
//! Retailers send wide sales/stock reports: product identity columns on the
//! left, then one block of metric columns per store, under a multi-row
//! merged header. This crate turns such a grid into one long table with one
//! row per (product, store) pair.
//!
//! Pipeline (per dialect):
//! - `locator`: find product fields, store blocks and the first data row
//! - `expand`: emit one raw record per product row x store block
//! - `coerce`: rename, type, fold duplicates, sort
//!
//! `dialect` holds the concrete drivers, `selector` picks one (with at most
//! one fallback) from a retailer choice.

pub mod coerce;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expand;
pub mod locator;
pub mod metric;
pub mod schema;
pub mod selector;
pub mod table;

pub use config::{ReportConfig, ReportSettings, RetailerConfig, RetailerOverrides};
pub use dialect::{driver_for, DialectDriver, DialectId};
pub use error::DialectError;
pub use metric::{Metric, MetricKind};
pub use schema::{ProductField, Schema};
pub use selector::{DnsFormat, Retailer, Selection, Selector, SelectorState, Transformed};
pub use table::{CanonicalRow, CanonicalTable, Column, CoercionWarning, MetricValue, RowOrder, TableValue};

use engine::MergeAwareGrid;

/// Runs the selector for `selection` over an already loaded grid.
pub fn transform(grid: &dyn MergeAwareGrid, selection: Selection) -> Result<Transformed, DialectError> {
    Selector::new(selection).run(grid)
}
