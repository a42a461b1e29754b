//! FILENAME: reshape-engine/src/locator/mod.rs
//! Schema Locator - turns a raw grid into a `Schema`.
//!
//! Strategies:
//! - `label_scan`: fixed header rows, sections and fields found by label
//! - `merged`: header depth and section extents read from merge geometry
//! - `fixed`: rigid column offsets for layouts that do not drift
//!
//! The helpers here are shared by all three: section scanning, product
//! field resolution, metric label scanning and store code lookup.

pub mod fixed;
pub mod label_scan;
pub mod merged;

use engine::{CellValue, MergeAwareGrid};

use crate::error::DialectError;
use crate::schema::{MetricColumn, ProductFieldMap, ProductFieldSpec, Requirement, StoreBlock};

pub use fixed::{FixedLayout, ScannedHeaderLayout};
pub use label_scan::LabelScanLayout;
pub use merged::MergedLayout;

/// Caption of the product identity section.
pub const PRODUCT_SECTION: &str = "Изделие";
/// Caption of the totals section, skipped when collecting stores.
pub const TOTALS_SECTION: &str = "Итого";

/// A top-level header section: a caption and the columns it governs.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: String,
    pub start: u32,
    /// Exclusive.
    pub end: u32,
}

impl Section {
    fn is_store(&self) -> bool {
        self.label != PRODUCT_SECTION && self.label != TOTALS_SECTION
    }
}

/// Splits `row` into sections starting at each non-empty cell in
/// `[from, to)`. A section ends where the next one starts, or at `to`.
pub fn scan_sections(grid: &dyn MergeAwareGrid, row: u32, from: u32, to: u32) -> Vec<Section> {
    let starts: Vec<u32> = (from..to)
        .filter(|&col| !grid.value(row, col).is_empty())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| Section {
            label: grid.value(row, start).display_value(),
            start,
            end: starts.get(i + 1).copied().unwrap_or(to),
        })
        .collect()
}

/// Resolves product fields by exact label within `[from, to)` of `row`.
///
/// The first matching column wins. Required fields that are not found are
/// reported together in one `MissingRequiredField`.
pub fn resolve_product_fields(
    grid: &dyn MergeAwareGrid,
    row: u32,
    from: u32,
    to: u32,
    spec: ProductFieldSpec,
) -> Result<ProductFieldMap, DialectError> {
    let mut map = ProductFieldMap::new(spec.iter().map(|(field, _)| *field));
    let mut missing = Vec::new();

    for (field, requirement) in spec {
        let found = (from..to).find(|&col| grid.value(row, col).is_label(field.source_label()));
        match (found, requirement) {
            (Some(col), _) => map.insert(*field, col),
            (None, Requirement::Required) => missing.push(field.source_label().to_string()),
            (None, Requirement::Optional) => {
                log::debug!(
                    target: "reshape::locate",
                    "optional field '{}' absent from row {}",
                    field.source_label(),
                    row
                );
            }
        }
    }

    if missing.is_empty() {
        Ok(map)
    } else {
        Err(DialectError::MissingRequiredField { labels: missing, row })
    }
}

/// Non-empty labels of `metric_row` inside `[start, end)`.
pub fn scan_metrics(grid: &dyn MergeAwareGrid, metric_row: u32, start: u32, end: u32) -> Vec<MetricColumn> {
    (start..end)
        .filter_map(|col| {
            let value = grid.value(metric_row, col);
            if value.is_empty() {
                None
            } else {
                Some(MetricColumn { raw_label: value.display_value(), col })
            }
        })
        .collect()
}

/// First non-empty cell of `rows` × `[start, end)`, scanning row by row.
pub fn find_store_code(
    grid: &dyn MergeAwareGrid,
    rows: std::ops::Range<u32>,
    start: u32,
    end: u32,
) -> Option<CellValue> {
    rows.flat_map(|row| (start..end).map(move |col| (row, col)))
        .map(|(row, col)| grid.value(row, col))
        .find(|value| !value.is_empty())
        .cloned()
}

/// Turns store sections into blocks with metric columns read from
/// `metric_row` and codes read from `code_rows`.
///
/// Product and totals sections are skipped; so are sections with no metric
/// labels at all, which are decorative captions rather than stores.
pub fn build_store_blocks(
    grid: &dyn MergeAwareGrid,
    sections: &[Section],
    metric_row: u32,
    code_rows: std::ops::Range<u32>,
) -> Vec<StoreBlock> {
    sections
        .iter()
        .filter(|section| section.is_store())
        .filter_map(|section| {
            let metrics = scan_metrics(grid, metric_row, section.start, section.end);
            if metrics.is_empty() {
                log::warn!(
                    target: "reshape::locate",
                    "section '{}' at column {} has no metric labels, skipped",
                    section.label,
                    section.start
                );
                return None;
            }
            Some(StoreBlock {
                name: section.label.clone(),
                code: find_store_code(grid, code_rows.clone(), section.start, section.end),
                start: section.start,
                end: section.end,
                metrics,
            })
        })
        .collect()
}
