//! FILENAME: reshape-engine/src/table.rs
//! Canonical output: one typed row per (product, store).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::metric::{Metric, MetricKind};
use crate::schema::ProductField;

/// A typed metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Count(i64),
    Money(f64),
}

impl MetricValue {
    pub fn zero(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Count => MetricValue::Count(0),
            MetricKind::Money => MetricValue::Money(0.0),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            MetricValue::Count(n) => *n == 0,
            MetricValue::Money(x) => *x == 0.0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Count(n) => *n as f64,
            MetricValue::Money(x) => *x,
        }
    }

    /// Adds two values of the same kind; mixed kinds keep the left kind.
    pub fn add(self, other: MetricValue) -> MetricValue {
        match (self, other) {
            (MetricValue::Count(a), MetricValue::Count(b)) => MetricValue::Count(a + b),
            (MetricValue::Count(a), b) => MetricValue::Count(a + b.as_f64() as i64),
            (MetricValue::Money(a), b) => MetricValue::Money(a + b.as_f64()),
        }
    }
}

/// One column of the canonical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Product(ProductField),
    StoreName,
    StoreCode,
    Metric(Metric),
}

/// A single cell of the canonical table, as handed to the report writer.
#[derive(Debug, Clone, PartialEq)]
pub enum TableValue<'a> {
    Text(&'a str),
    Integer(i64),
    Decimal(f64),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub model_code: String,
    pub name: String,
    pub article: i64,
    pub store_name: String,
    pub store_code: Option<i64>,
    /// Values aligned with the table's metric columns.
    pub metrics: Vec<MetricValue>,
}

/// Leading identity key of the canonical sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Article, name, model code.
    #[default]
    ArticleFirst,
    /// Model code, name, article.
    ModelCodeFirst,
}

impl CanonicalRow {
    /// Identity ordering under `order`, then store name and store code.
    /// Articles compare by their decimal text, so "102" < "11" < "2".
    pub fn identity_cmp(&self, other: &CanonicalRow, order: RowOrder) -> Ordering {
        let article = || self.article.to_string().cmp(&other.article.to_string());
        let name = || self.name.cmp(&other.name);
        let model = || self.model_code.cmp(&other.model_code);
        let product = match order {
            RowOrder::ArticleFirst => article().then_with(name).then_with(model),
            RowOrder::ModelCodeFirst => model().then_with(name).then_with(article),
        };
        product
            .then_with(|| self.store_name.cmp(&other.store_name))
            .then_with(|| self.store_code.cmp(&other.store_code))
    }
}

/// A metric cell that could not be parsed and was replaced with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub row: u32,
    pub column: String,
    pub raw: String,
}

/// The normalized, dialect-independent result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    pub columns: Vec<Column>,
    /// Title of the store-name column ("Магазин" or "Город").
    pub store_name_label: &'static str,
    pub rows: Vec<CanonicalRow>,
    pub warnings: Vec<CoercionWarning>,
}

impl CanonicalTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Metric columns present in this table, in canonical order.
    pub fn metrics(&self) -> Vec<Metric> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                Column::Metric(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn header(&self, column: Column) -> &'static str {
        match column {
            Column::Product(field) => field.output_label(),
            Column::StoreName => self.store_name_label,
            Column::StoreCode => "Код магазина",
            Column::Metric(metric) => metric.label(),
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| self.header(*c)).collect()
    }

    /// Cell of `row` under `column`; `Empty` when the row lacks it.
    pub fn value<'a>(&self, row: &'a CanonicalRow, column: Column) -> TableValue<'a> {
        match column {
            Column::Product(ProductField::ModelCode) => TableValue::Text(&row.model_code),
            Column::Product(ProductField::Name) => TableValue::Text(&row.name),
            Column::Product(ProductField::Article) => TableValue::Integer(row.article),
            Column::StoreName => TableValue::Text(&row.store_name),
            Column::StoreCode => row.store_code.map(TableValue::Integer).unwrap_or(TableValue::Empty),
            Column::Metric(metric) => {
                match self.metric_index(metric).and_then(|i| row.metrics.get(i)) {
                    Some(MetricValue::Count(n)) => TableValue::Integer(*n),
                    Some(MetricValue::Money(x)) => TableValue::Decimal(*x),
                    None => TableValue::Empty,
                }
            }
        }
    }

    /// Column position of `metric`'s value within each row.
    pub fn metric_index(&self, metric: Metric) -> Option<usize> {
        self.metrics().iter().position(|m| *m == metric)
    }
}
