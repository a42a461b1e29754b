//! FILENAME: reshape-engine/src/coerce.rs
//! Type Coercer & Column Arranger.
//!
//! Renames raw metric labels, types every value, drops summary rows (the
//! only row filter in the pipeline), folds duplicate product x store rows
//! together and sorts by identity.

use std::collections::BTreeSet;

use engine::CellValue;
use rustc_hash::FxHashMap;

use crate::expand::MetricRecord;
use crate::metric::{Metric, MetricKind};
use crate::schema::{ProductField, Schema};
use crate::table::{CanonicalRow, CanonicalTable, Column, CoercionWarning, MetricValue, RowOrder};

/// Per-dialect coercion policy.
#[derive(Debug, Clone)]
pub struct CoerceOptions {
    /// Title of the store-name column.
    pub store_name_label: &'static str,
    /// Drop rows whose metrics are all zero.
    pub drop_zero_rows: bool,
    pub order: RowOrder,
}

impl Default for CoerceOptions {
    fn default() -> Self {
        CoerceOptions { store_name_label: "Магазин", drop_zero_rows: false, order: RowOrder::ArticleFirst }
    }
}

type IdentityKey = (String, String, i64, String, Option<i64>);

/// Metrics the located stores actually carry, in canonical order.
pub fn present_metrics(schema: &Schema) -> Vec<Metric> {
    let mut present = BTreeSet::new();
    for store in &schema.stores {
        for column in &store.metrics {
            match Metric::from_raw_label(&column.raw_label) {
                Some(metric) => {
                    present.insert(metric);
                }
                None => log::debug!(
                    target: "reshape::coerce",
                    "label '{}' of store '{}' is not a metric, ignored",
                    column.raw_label,
                    store.name
                ),
            }
        }
    }
    present.into_iter().collect()
}

/// Canonical column order restricted to what this schema carries.
pub fn arrange_columns(schema: &Schema, metrics: &[Metric]) -> Vec<Column> {
    let mut columns: Vec<Column> = [ProductField::ModelCode, ProductField::Name, ProductField::Article]
        .into_iter()
        .filter(|field| schema.products.carries(*field))
        .map(Column::Product)
        .collect();
    columns.push(Column::StoreName);
    if schema.has_store_codes() {
        columns.push(Column::StoreCode);
    }
    columns.extend(metrics.iter().copied().map(Column::Metric));
    columns
}

/// Integer form of an article or store code; `None` when non-numeric.
fn coerce_code(value: &CellValue) -> Option<i64> {
    value.as_number().map(|n| n.trunc() as i64)
}

fn coerce_metric(
    value: &CellValue,
    kind: MetricKind,
    row: u32,
    label: &str,
    warnings: &mut Vec<CoercionWarning>,
) -> MetricValue {
    let parsed = match value.as_number() {
        Some(n) => n,
        None => {
            if !value.is_empty() {
                log::debug!(
                    target: "reshape::coerce",
                    "row {} '{}': '{}' is not numeric, using 0",
                    row,
                    label,
                    value.display_value()
                );
                warnings.push(CoercionWarning {
                    row,
                    column: label.to_string(),
                    raw: value.display_value(),
                });
            }
            0.0
        }
    };
    match kind {
        MetricKind::Count => MetricValue::Count(parsed.trunc() as i64),
        MetricKind::Money => MetricValue::Money(parsed),
    }
}

/// Types `records` into a canonical table.
pub fn coerce(records: Vec<MetricRecord>, schema: &Schema, options: &CoerceOptions) -> CanonicalTable {
    let metrics = present_metrics(schema);
    let columns = arrange_columns(schema, &metrics);

    let mut warnings = Vec::new();
    let mut rows: Vec<CanonicalRow> = Vec::new();
    let mut index: FxHashMap<IdentityKey, usize> = FxHashMap::default();
    let mut dropped = 0usize;

    for record in records {
        let Some(article) = coerce_code(&record.article) else {
            dropped += 1;
            continue;
        };

        let store_code = record.store_code.as_ref().and_then(|code| {
            let parsed = coerce_code(code);
            if parsed.is_none() {
                log::warn!(
                    target: "reshape::coerce",
                    "store '{}' has non-numeric code '{}'",
                    record.store_name,
                    code.display_value()
                );
            }
            parsed
        });

        let mut values: Vec<MetricValue> = metrics.iter().map(|m| MetricValue::zero(m.kind())).collect();
        for (label, raw) in &record.values {
            let Some(metric) = Metric::from_raw_label(label) else { continue };
            if let Some(i) = metrics.iter().position(|m| *m == metric) {
                let value = coerce_metric(raw, metric.kind(), record.row, label, &mut warnings);
                values[i] = values[i].add(value);
            }
        }

        let row = CanonicalRow {
            model_code: record.model_code.display_value(),
            name: record.name.display_value(),
            article,
            store_name: record.store_name,
            store_code,
            metrics: values,
        };

        let key = (
            row.model_code.clone(),
            row.name.clone(),
            row.article,
            row.store_name.clone(),
            row.store_code,
        );
        match index.get(&key) {
            Some(&existing) => {
                let target = &mut rows[existing];
                for (acc, value) in target.metrics.iter_mut().zip(row.metrics) {
                    *acc = acc.add(value);
                }
            }
            None => {
                index.insert(key, rows.len());
                rows.push(row);
            }
        }
    }

    if options.drop_zero_rows {
        rows.retain(|row| row.metrics.iter().any(|v| !v.is_zero()));
    }
    rows.sort_by(|a, b| a.identity_cmp(b, options.order));

    if !warnings.is_empty() {
        log::warn!(
            target: "reshape::coerce",
            "{} metric cells were not numeric and were set to 0",
            warnings.len()
        );
    }
    log::debug!(
        target: "reshape::coerce",
        "{} rows kept, {} records dropped as summary rows",
        rows.len(),
        dropped
    );

    CanonicalTable {
        columns,
        store_name_label: options.store_name_label,
        rows,
        warnings,
    }
}
