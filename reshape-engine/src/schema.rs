//! FILENAME: reshape-engine/src/schema.rs
//! Located schema: where product identity lives, where each store's metric
//! block starts and ends, and where data rows begin.
//!
//! A `Schema` is rebuilt for every file; nothing about block widths is
//! carried over between uploads.

use std::collections::BTreeMap;

use engine::CellValue;
use serde::{Deserialize, Serialize};

/// Canonical product identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductField {
    /// Retailer's own product code ("Код"), output as "Артикул".
    Article,
    /// Display name ("Товар"), output as "Наименование".
    Name,
    /// Manufacturer / model code ("КодПроизводителя"), output as "Код модели".
    ModelCode,
}

impl ProductField {
    /// Header label the retailer uses for this field.
    pub fn source_label(self) -> &'static str {
        match self {
            ProductField::Article => "Код",
            ProductField::Name => "Товар",
            ProductField::ModelCode => "КодПроизводителя",
        }
    }

    /// Output column title.
    pub fn output_label(self) -> &'static str {
        match self {
            ProductField::Article => "Артикул",
            ProductField::Name => "Наименование",
            ProductField::ModelCode => "Код модели",
        }
    }
}

/// Whether a dialect insists on a product field being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    /// Carried as an output column, left blank when the source lacks it.
    Optional,
}

/// Product fields a dialect carries, in lookup order.
pub type ProductFieldSpec = &'static [(ProductField, Requirement)];

/// Canonical field -> column index in the raw grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFieldMap {
    columns: BTreeMap<ProductField, u32>,
    carried: Vec<ProductField>,
}

impl ProductFieldMap {
    pub fn new(carried: impl IntoIterator<Item = ProductField>) -> Self {
        ProductFieldMap {
            columns: BTreeMap::new(),
            carried: carried.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, field: ProductField, col: u32) {
        self.columns.insert(field, col);
    }

    pub fn column(&self, field: ProductField) -> Option<u32> {
        self.columns.get(&field).copied()
    }

    pub fn carries(&self, field: ProductField) -> bool {
        self.carried.contains(&field)
    }
}

/// One metric column inside a store block.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumn {
    /// Dialect-specific label, e.g. "Кол-во".
    pub raw_label: String,
    pub col: u32,
}

/// One retail location's column region.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreBlock {
    pub name: String,
    /// Raw store code cell; coerced to an integer later.
    pub code: Option<CellValue>,
    /// First column of the block.
    pub start: u32,
    /// One past the last column of the block.
    pub end: u32,
    pub metrics: Vec<MetricColumn>,
}

impl StoreBlock {
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Everything the Row Expander needs to walk a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub products: ProductFieldMap,
    pub stores: Vec<StoreBlock>,
    pub first_data_row: u32,
}

impl Schema {
    pub fn new(products: ProductFieldMap, stores: Vec<StoreBlock>, first_data_row: u32) -> Self {
        debug_assert!(blocks_are_ordered(&stores), "store blocks overlap or are out of order");
        Schema { products, stores, first_data_row }
    }

    /// Whether any store block carries a code.
    pub fn has_store_codes(&self) -> bool {
        self.stores.iter().any(|s| s.code.is_some())
    }
}

/// Block starts strictly increase and no block reaches into the next.
pub fn blocks_are_ordered(stores: &[StoreBlock]) -> bool {
    stores.iter().all(|s| s.start < s.end)
        && stores.windows(2).all(|w| w[0].end <= w[1].start)
}
