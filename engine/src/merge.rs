//! FILENAME: engine/src/merge.rs
//! PURPOSE: Merged-cell geometry and the grid capability built on top of it.
//! CONTEXT: Retailer exports encode their header hierarchy through merged
//! cells (a store name merged across all of that store's metric columns, a
//! totals caption merged down over several header rows). Structural
//! discovery needs "what span covers this cell", so the reshape engine talks
//! to grids through `MergeAwareGrid` rather than any reader library.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// A rectangular merged range, inclusive on both ends, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedRegion {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl MergedRegion {
    /// Builds a region, normalizing the corners so start <= end.
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        MergedRegion {
            start_row: start_row.min(end_row),
            start_col: start_col.min(end_col),
            end_row: start_row.max(end_row),
            end_col: start_col.max(end_col),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn height(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn width(&self) -> u32 {
        self.end_col - self.start_col + 1
    }
}

/// Extent of the (possibly merged) cell covering a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub rows: u32,
    pub cols: u32,
}

impl Span {
    pub const SINGLE: Span = Span { rows: 1, cols: 1 };
}

/// Read access to a raw grid plus merge metadata.
///
/// Implementors report values at absolute 0-based positions; positions
/// outside the used area read as `CellValue::Empty`.
pub trait MergeAwareGrid {
    fn value(&self, row: u32, col: u32) -> &CellValue;

    /// Number of rows in the used area (max row index + 1, or 0 when empty).
    fn row_count(&self) -> u32;

    /// Number of columns in the used area (max col index + 1, or 0 when empty).
    fn col_count(&self) -> u32;

    /// The merged region covering `(row, col)`, if any.
    fn merged_region_at(&self, row: u32, col: u32) -> Option<MergedRegion>;

    /// Span of the merge anchored at `(row, col)`.
    /// Cells that are not the top-left anchor of a merge report a single cell.
    fn span_at(&self, row: u32, col: u32) -> Span {
        match self.merged_region_at(row, col) {
            Some(region) if region.start_row == row && region.start_col == col => Span {
                rows: region.height(),
                cols: region.width(),
            },
            _ => Span::SINGLE,
        }
    }

    fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.col_count() == 0
    }
}
