//! FILENAME: engine/src/lib.rs
//! PURPOSE: Raw grid model shared by the reader and the reshape engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod merge;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use coord::{col_to_index, index_to_col, CellCoord, A1};
pub use grid::Grid;
pub use merge::{MergeAwareGrid, MergedRegion, Span};
