//! FILENAME: reshape-engine/src/locator/merged.rs
//! Merged-cell structural strategy.
//!
//! Nothing about header depth or block width is hardcoded:
//! 1. The "Изделие" caption anchors the product section. Its merged width
//!    bounds the product field scan in the row beneath its merged span.
//! 2. The "Итого" caption must sit immediately right of the product section.
//!    Its merged height is the number of header rows above the metric labels.
//! 3. The row below the totals span is the metric label row for every store.
//! 4. Data starts on the next row, or one later when that row is a category
//!    total merged across the whole product section.
//! 5. Stores are the captions right of the totals section; rows between the
//!    caption row and the metric row carry store codes.
//!
//! Formats without merge metadata (.xls, .ods) leave "Итого" unmerged. The
//! metric label row is then the first row below the anchor whose product
//! section holds the article label, and it doubles as the field row.
//!
//! Missing anchors mean the upload belongs to another dialect.

use engine::{MergeAwareGrid, A1};

use crate::error::DialectError;
use crate::locator::{build_store_blocks, resolve_product_fields, scan_sections, PRODUCT_SECTION, TOTALS_SECTION};
use crate::schema::{ProductField, ProductFieldSpec, Schema};

/// Column extent of a caption: its merged width, or up to the next
/// non-empty cell of the same row when the source carries no merge data.
fn caption_end(grid: &dyn MergeAwareGrid, row: u32, col: u32) -> u32 {
    let span = grid.span_at(row, col);
    if span.cols > 1 {
        return col + span.cols;
    }
    (col + 1..grid.col_count())
        .find(|&c| !grid.value(row, c).is_empty())
        .unwrap_or(grid.col_count())
}

#[derive(Debug, Clone)]
pub struct MergedLayout {
    pub fields: ProductFieldSpec,
    /// How many leading rows may precede the product caption.
    pub header_search_rows: u32,
}

impl MergedLayout {
    pub fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        let (anchor_row, anchor_col) = self.find_product_anchor(grid)?;
        let product_span = grid.span_at(anchor_row, anchor_col);
        let product_end = caption_end(grid, anchor_row, anchor_col);

        let totals_col = product_end;
        let totals_cell = grid.value(anchor_row, totals_col);
        if !totals_cell.is_label(TOTALS_SECTION) {
            return Err(DialectError::StructureMismatch {
                expected: format!("'{}' at {}", TOTALS_SECTION, A1((anchor_row, totals_col))),
                found: describe(totals_cell.display_value()),
            });
        }
        let totals_span = grid.span_at(anchor_row, totals_col);
        let totals_end = caption_end(grid, anchor_row, totals_col);
        let (field_row, metric_row) = match grid.merged_region_at(anchor_row, totals_col) {
            Some(_) => (anchor_row + product_span.rows, anchor_row + totals_span.rows),
            None => {
                let label_row = self.find_label_row(grid, anchor_row, anchor_col, product_end)?;
                log::debug!(
                    target: "reshape::locate",
                    "'{}' carries no merge data, labels found on row {}",
                    TOTALS_SECTION,
                    label_row
                );
                (label_row, label_row)
            }
        };
        let products = resolve_product_fields(grid, field_row, anchor_col, product_end, self.fields)?;

        let mut first_data_row = metric_row + 1;
        if self.is_category_total(grid, first_data_row, anchor_col, product_end) {
            log::debug!(target: "reshape::locate", "row {} is a category total, skipped", first_data_row);
            first_data_row += 1;
        }

        let sections = scan_sections(grid, anchor_row, totals_end, grid.col_count());
        let stores = build_store_blocks(grid, &sections, metric_row, anchor_row + 1..metric_row);
        if stores.is_empty() {
            return Err(DialectError::NoStoresFound { row: anchor_row });
        }

        log::debug!(
            target: "reshape::locate",
            "merged layout: anchor {}, {} header rows, {} stores, data from row {}",
            A1((anchor_row, anchor_col)),
            metric_row - anchor_row + 1,
            stores.len(),
            first_data_row
        );
        Ok(Schema::new(products, stores, first_data_row))
    }

    fn find_product_anchor(&self, grid: &dyn MergeAwareGrid) -> Result<(u32, u32), DialectError> {
        let rows = self.header_search_rows.min(grid.row_count());
        (0..rows)
            .flat_map(|row| (0..grid.col_count()).map(move |col| (row, col)))
            .find(|&(row, col)| grid.value(row, col).is_label(PRODUCT_SECTION))
            .ok_or_else(|| DialectError::StructureMismatch {
                expected: format!("'{}' caption", PRODUCT_SECTION),
                found: format!("no such caption in the first {} rows", rows),
            })
    }

    /// First row below the anchor holding the article label inside the
    /// product section.
    fn find_label_row(
        &self,
        grid: &dyn MergeAwareGrid,
        anchor_row: u32,
        start: u32,
        end: u32,
    ) -> Result<u32, DialectError> {
        let label = ProductField::Article.source_label();
        let last = (anchor_row + 1 + self.header_search_rows).min(grid.row_count());
        (anchor_row + 1..last)
            .find(|&row| (start..end).any(|col| grid.value(row, col).is_label(label)))
            .ok_or_else(|| DialectError::StructureMismatch {
                expected: format!("'{}' label below {}", label, A1((anchor_row, start))),
                found: format!("none within {} rows", self.header_search_rows),
            })
    }

    /// A row merged across the full product section width.
    fn is_category_total(&self, grid: &dyn MergeAwareGrid, row: u32, start: u32, end: u32) -> bool {
        match grid.merged_region_at(row, start) {
            Some(region) => region.start_col == start && region.end_col + 1 >= end,
            None => false,
        }
    }
}

fn describe(text: String) -> String {
    if text.is_empty() {
        "an empty cell".to_string()
    } else {
        format!("'{}'", text)
    }
}
