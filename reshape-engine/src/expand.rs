//! FILENAME: reshape-engine/src/expand.rs
//! Row Expander - one record per (product row x store block).
//!
//! No filtering happens here: category and total rows are emitted like any
//! other and removed once, during coercion, by the article check. The
//! located first data row is a heuristic and this keeps its misses harmless.

use engine::{CellValue, MergeAwareGrid};

use crate::schema::{ProductField, Schema};

/// One emitted fact with raw, untyped values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    /// Source row, kept for coercion diagnostics.
    pub row: u32,
    pub article: CellValue,
    pub name: CellValue,
    pub model_code: CellValue,
    pub store_name: String,
    pub store_code: Option<CellValue>,
    /// Raw metric label -> raw value, in block column order.
    pub values: Vec<(String, CellValue)>,
}

/// Value used for a metric cell that is empty in the source.
pub const ZERO_DEFAULT: CellValue = CellValue::Number(0.0);

fn product_value(grid: &dyn MergeAwareGrid, schema: &Schema, row: u32, field: ProductField) -> CellValue {
    schema
        .products
        .column(field)
        .map(|col| grid.value(row, col).clone())
        .unwrap_or(CellValue::Empty)
}

/// Walks every row from the first data row to the end of the grid.
pub fn expand(grid: &dyn MergeAwareGrid, schema: &Schema) -> Vec<MetricRecord> {
    let mut records = Vec::new();

    for row in schema.first_data_row..grid.row_count() {
        let article = product_value(grid, schema, row, ProductField::Article);
        let name = product_value(grid, schema, row, ProductField::Name);
        let model_code = product_value(grid, schema, row, ProductField::ModelCode);

        for store in &schema.stores {
            let values = store
                .metrics
                .iter()
                .map(|metric| {
                    let value = grid.value(row, metric.col);
                    let value = if value.is_empty() { ZERO_DEFAULT } else { value.clone() };
                    (metric.raw_label.clone(), value)
                })
                .collect();

            records.push(MetricRecord {
                row,
                article: article.clone(),
                name: name.clone(),
                model_code: model_code.clone(),
                store_name: store.name.clone(),
                store_code: store.code.clone(),
                values,
            });
        }
    }

    log::debug!(
        target: "reshape::expand",
        "expanded {} records from {} stores",
        records.len(),
        schema.stores.len()
    );
    records
}
