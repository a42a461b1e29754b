//! FILENAME: persistence/src/xlsx_reader.rs
//! Reads the first worksheet of an upload into a raw `Grid`.
//!
//! Cells keep their absolute sheet position (calamine ranges start at the
//! first used cell, not at A1). Merged regions are loaded for xlsx files;
//! other formats yield a grid without merge data.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use engine::{CellValue, Grid, MergedRegion};

use crate::PersistenceError;

/// Loads the first worksheet of the workbook at `path`.
pub fn load_grid(path: &Path) -> Result<Grid, PersistenceError> {
    let sheets = open_workbook_auto(path)?;
    log::debug!(target: "persistence::read", "opened {}", path.display());
    read_first_sheet(sheets)
}

/// Same as `load_grid`, for an upload already held in memory.
pub fn load_grid_from_bytes(bytes: &[u8]) -> Result<Grid, PersistenceError> {
    let sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    read_first_sheet(sheets)
}

fn read_first_sheet<RS: Read + Seek>(mut sheets: Sheets<RS>) -> Result<Grid, PersistenceError> {
    let sheet_name = sheets
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PersistenceError::InvalidFormat("Workbook contains no sheets".to_string()))?;

    let range = sheets
        .worksheet_range(&sheet_name)
        .map_err(|_| PersistenceError::SheetNotFound(sheet_name.clone()))?;

    let mut grid = Grid::new();
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    for (row, col, data) in range.used_cells() {
        let value = convert(data);
        if !value.is_empty() {
            grid.set(row_offset + row as u32, col_offset + col as u32, value);
        }
    }

    if let Sheets::Xlsx(ref mut xlsx) = sheets {
        xlsx.load_merged_regions()?;
        for (_, _, dims) in xlsx.merged_regions_by_sheet(&sheet_name) {
            grid.add_merge(MergedRegion::new(dims.start.0, dims.start.1, dims.end.0, dims.end.1));
        }
    }

    log::info!(
        target: "persistence::read",
        "sheet '{}': {} cells, {} merged regions",
        sheet_name,
        grid.cell_count(),
        grid.merged_regions().len()
    );
    Ok(grid)
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
