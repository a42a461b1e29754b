//! FILENAME: reshape-engine/src/locator/label_scan.rs
//! Label-scan strategy for layouts with a small fixed header.
//!
//! Header rows are known up front. Product fields are found by label in the
//! field row; stores are the non-product, non-totals captions of the section
//! row; each store's metric columns are whatever labels sit under it in the
//! metric row, so block width is read from the data rather than assumed.

use engine::MergeAwareGrid;

use crate::error::DialectError;
use crate::locator::{build_store_blocks, resolve_product_fields, scan_sections};
use crate::schema::{ProductFieldSpec, Schema};

#[derive(Debug, Clone)]
pub struct LabelScanLayout {
    /// Row holding "Изделие", "Итого" and store captions.
    pub section_row: u32,
    /// Row holding the product field labels.
    pub field_row: u32,
    /// Row holding metric labels for every store.
    pub metric_row: u32,
    /// Row holding store codes, when the layout has one.
    pub code_row: Option<u32>,
    pub first_data_row: u32,
    pub fields: ProductFieldSpec,
}

impl LabelScanLayout {
    pub fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        let width = grid.col_count();
        let products = resolve_product_fields(grid, self.field_row, 0, width, self.fields)?;

        let sections = scan_sections(grid, self.section_row, 0, width);
        let code_rows = match self.code_row {
            Some(row) => row..row + 1,
            None => 0..0,
        };
        let stores = build_store_blocks(grid, &sections, self.metric_row, code_rows);
        if stores.is_empty() {
            return Err(DialectError::NoStoresFound { row: self.section_row });
        }

        log::debug!(
            target: "reshape::locate",
            "label-scan located {} stores, data from row {}",
            stores.len(),
            self.first_data_row
        );
        Ok(Schema::new(products, stores, self.first_data_row))
    }
}
