//! FILENAME: engine/src/grid.rs
//! PURPOSE: The raw, headerless grid read from a retailer spreadsheet.
//! CONTEXT: Sparse storage (HashMap) keyed by absolute 0-based (row, col),
//! plus the merged regions of the source sheet. A grid is filled once by the
//! reader and then only read by the reshape engine.

use std::collections::HashMap;

use crate::cell::CellValue;
use crate::merge::{MergeAwareGrid, MergedRegion};

static EMPTY: CellValue = CellValue::Empty;

/// Sparse grid of raw cell values with merge metadata.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Non-empty cells keyed by (row, col).
    cells: HashMap<(u32, u32), CellValue>,

    /// Merged ranges in the order the reader supplied them.
    merged: Vec<MergedRegion>,

    /// Exclusive bounds of the used area.
    rows: u32,
    cols: u32,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dense grid from rows of values; handy for fixtures.
    pub fn from_rows<R, V>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut grid = Grid::new();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                grid.set(r as u32, c as u32, value.into());
            }
        }
        grid
    }

    /// Stores a value. Empty values are not stored but still do not shrink bounds.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&(row, col));
            return;
        }
        self.rows = self.rows.max(row + 1);
        self.cols = self.cols.max(col + 1);
        self.cells.insert((row, col), value);
    }

    /// Registers a merged region; the bounds grow to include it.
    pub fn add_merge(&mut self, region: MergedRegion) {
        self.rows = self.rows.max(region.end_row + 1);
        self.cols = self.cols.max(region.end_col + 1);
        self.merged.push(region);
    }

    /// Convenience for fixtures: set the anchor value and merge in one go.
    pub fn set_merged(&mut self, region: MergedRegion, value: CellValue) {
        self.set(region.start_row, region.start_col, value);
        self.add_merge(region);
    }

    pub fn get(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    pub fn merged_regions(&self) -> &[MergedRegion] {
        &self.merged
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl MergeAwareGrid for Grid {
    fn value(&self, row: u32, col: u32) -> &CellValue {
        self.get(row, col)
    }

    fn row_count(&self) -> u32 {
        self.rows
    }

    fn col_count(&self) -> u32 {
        self.cols
    }

    fn merged_region_at(&self, row: u32, col: u32) -> Option<MergedRegion> {
        self.merged.iter().copied().find(|m| m.contains(row, col))
    }
}
