//! FILENAME: reshape-engine/src/dialect/dns_old.rs
//! DNS "old" format: rigid three-column store blocks.
//!
//! Columns 0..2 are article, name and manufacturer code, 3..5 are totals,
//! and every store from column 6 holds sales, stock and in-transit units in
//! that order. Rows with nothing sold, stocked or in transit are dropped,
//! and rows sort by manufacturer code rather than article.

use engine::MergeAwareGrid;

use crate::coerce::CoerceOptions;
use crate::dialect::{DialectDriver, DialectId};
use crate::error::DialectError;
use crate::locator::FixedLayout;
use crate::schema::{ProductField, Schema};
use crate::table::RowOrder;

const LAYOUT: FixedLayout = FixedLayout {
    product_columns: &[
        (ProductField::Article, 0),
        (ProductField::Name, 1),
        (ProductField::ModelCode, 2),
    ],
    totals_col: 3,
    stores_from: 6,
    block_metrics: &["Кол-во", "Ост. кол-во", "Ост. пути"],
    section_row: 0,
    code_row: 1,
    first_data_row: 3,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DnsOld;

impl DialectDriver for DnsOld {
    fn id(&self) -> DialectId {
        DialectId::DnsOld
    }

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        LAYOUT.locate(grid)
    }

    fn coerce_options(&self) -> CoerceOptions {
        CoerceOptions {
            drop_zero_rows: true,
            order: RowOrder::ModelCodeFirst,
            ..CoerceOptions::default()
        }
    }
}
