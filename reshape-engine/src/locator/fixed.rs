//! FILENAME: reshape-engine/src/locator/fixed.rs
//! Fixed-offset strategies for layouts known not to drift.
//!
//! `FixedLayout` trusts column offsets and block width completely and only
//! checks its two anchor captions. `ScannedHeaderLayout` keeps fixed product
//! and store columns but searches downward for its header rows, because the
//! retailer prepends a variable number of filter rows to the export.

use engine::{index_to_col, MergeAwareGrid, A1};

use crate::error::DialectError;
use crate::locator::{scan_metrics, Section, PRODUCT_SECTION, TOTALS_SECTION};
use crate::schema::{MetricColumn, ProductField, ProductFieldMap, Schema, StoreBlock};

#[derive(Debug, Clone)]
pub struct FixedLayout {
    pub product_columns: &'static [(ProductField, u32)],
    pub totals_col: u32,
    pub stores_from: u32,
    /// Metric labels assigned to each block by position; also the block width.
    pub block_metrics: &'static [&'static str],
    pub section_row: u32,
    pub code_row: u32,
    pub first_data_row: u32,
}

impl FixedLayout {
    pub fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        let product_col = self.product_columns.iter().map(|(_, col)| *col).min().unwrap_or(0);
        self.expect_caption(grid, product_col, PRODUCT_SECTION)?;
        self.expect_caption(grid, self.totals_col, TOTALS_SECTION)?;

        let mut products = ProductFieldMap::new(self.product_columns.iter().map(|(field, _)| *field));
        for (field, col) in self.product_columns {
            products.insert(*field, *col);
        }

        let width = self.block_metrics.len() as u32;
        let mut stores = Vec::new();
        let mut start = self.stores_from;
        while width > 0 && start < grid.col_count() {
            let end = start + width;
            let name = grid.value(self.section_row, start);
            if name.is_empty() {
                log::warn!(
                    target: "reshape::locate",
                    "fixed block at {} has no store caption, skipped",
                    A1((self.section_row, start))
                );
            } else {
                let metrics = self
                    .block_metrics
                    .iter()
                    .zip(start..end)
                    .map(|(label, col)| MetricColumn { raw_label: label.to_string(), col })
                    .collect();
                let code = grid.value(self.code_row, start);
                stores.push(StoreBlock {
                    name: name.display_value(),
                    code: if code.is_empty() { None } else { Some(code.clone()) },
                    start,
                    end,
                    metrics,
                });
            }
            start = end;
        }

        if stores.is_empty() {
            return Err(DialectError::NoStoresFound { row: self.section_row });
        }
        Ok(Schema::new(products, stores, self.first_data_row))
    }

    fn expect_caption(&self, grid: &dyn MergeAwareGrid, col: u32, caption: &str) -> Result<(), DialectError> {
        let cell = grid.value(self.section_row, col);
        if cell.is_label(caption) {
            Ok(())
        } else {
            Err(DialectError::StructureMismatch {
                expected: format!("'{}' at {}", caption, A1((self.section_row, col))),
                found: format!("'{}'", cell.display_value()),
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScannedHeaderLayout {
    /// Header depth the export was produced with; the search for the store
    /// caption row starts on the row after it.
    pub header_depth: u32,
    pub article_col: u32,
    pub name_col: u32,
    /// First column of the per-store area (everything before is totals).
    pub stores_from: u32,
    /// Label expected in the name column of the metric label row.
    pub name_label: &'static str,
}

impl ScannedHeaderLayout {
    pub fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        let caption_row = self.find_caption_row(grid)?;
        let code_row = caption_row + 1;
        let metric_row = caption_row + 2;

        if !grid.value(metric_row, self.name_col).is_label(self.name_label) {
            return Err(DialectError::MissingRequiredField {
                labels: vec![self.name_label.to_string()],
                row: metric_row,
            });
        }

        let mut products = ProductFieldMap::new([ProductField::Article, ProductField::Name]);
        products.insert(ProductField::Article, self.article_col);
        products.insert(ProductField::Name, self.name_col);

        let stores: Vec<StoreBlock> = self
            .store_sections(grid, caption_row, code_row)
            .into_iter()
            .filter_map(|(section, code)| {
                let metrics = scan_metrics(grid, metric_row, section.start, section.end);
                if metrics.is_empty() {
                    return None;
                }
                Some(StoreBlock {
                    name: section.label,
                    code: Some(code),
                    start: section.start,
                    end: section.end,
                    metrics,
                })
            })
            .collect();

        if stores.is_empty() {
            return Err(DialectError::NoStoresFound { row: code_row });
        }
        log::debug!(
            target: "reshape::locate",
            "scanned header at row {} (depth {}), {} stores",
            caption_row,
            self.header_depth,
            stores.len()
        );
        Ok(Schema::new(products, stores, metric_row + 1))
    }

    /// First row below the header depth whose name column is empty while the
    /// store area holds captions.
    fn find_caption_row(&self, grid: &dyn MergeAwareGrid) -> Result<u32, DialectError> {
        (self.header_depth + 1..grid.row_count())
            .find(|&row| {
                grid.value(row, self.name_col).is_empty()
                    && (self.stores_from..grid.col_count()).any(|col| !grid.value(row, col).is_empty())
            })
            .ok_or_else(|| DialectError::StructureMismatch {
                expected: format!(
                    "store caption row below row {} with data from column {}",
                    self.header_depth + 1,
                    index_to_col(self.stores_from)
                ),
                found: "no such row".to_string(),
            })
    }

    /// A store starts at every non-empty code cell; its caption is the last
    /// non-empty caption at or left of that column.
    fn store_sections(
        &self,
        grid: &dyn MergeAwareGrid,
        caption_row: u32,
        code_row: u32,
    ) -> Vec<(Section, engine::CellValue)> {
        let width = grid.col_count();
        let starts: Vec<u32> = (self.stores_from..width)
            .filter(|&col| !grid.value(code_row, col).is_empty())
            .collect();

        let mut caption = String::new();
        let mut caption_col = self.stores_from;
        let mut sections = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            for col in caption_col..=start {
                let value = grid.value(caption_row, col);
                if !value.is_empty() {
                    caption = value.display_value();
                }
            }
            caption_col = start + 1;

            let code = grid.value(code_row, start).clone();
            let label = if caption.is_empty() { code.display_value() } else { caption.clone() };
            sections.push((
                Section { label, start, end: starts.get(i + 1).copied().unwrap_or(width) },
                code,
            ));
        }
        sections
    }
}
