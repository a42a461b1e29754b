//! FILENAME: persistence/src/lib.rs
//! Spreadsheet I/O at both ends of the reshape pipeline.
//!
//! - `xlsx_reader`: upload (xlsx, xls, ods) -> raw `Grid` with merge data
//! - `report_writer`: `CanonicalTable` -> formatted report workbook

mod error;
mod report_writer;
mod xlsx_reader;

pub use error::PersistenceError;
pub use report_writer::{sheet_name, table_style, write_report, TABLE_HEADER_ROW, TOTAL_LABEL};
pub use xlsx_reader::{load_grid, load_grid_from_bytes};
