//! FILENAME: reshape-engine/src/dialect/dns_extended.rs
//! DNS "extended" format (July 2025 onwards).
//!
//! Adds cost, stock value and sales value ex VAT to every store block, and
//! the number of metrics per store changes between releases. Located purely
//! from merge geometry; see `locator::merged`.

use engine::MergeAwareGrid;

use crate::dialect::{DialectDriver, DialectId};
use crate::error::DialectError;
use crate::locator::MergedLayout;
use crate::schema::{ProductField, Requirement, Schema};

const LAYOUT: MergedLayout = MergedLayout {
    fields: &[
        (ProductField::Article, Requirement::Required),
        (ProductField::Name, Requirement::Required),
        (ProductField::ModelCode, Requirement::Required),
    ],
    header_search_rows: 10,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DnsExtended;

impl DialectDriver for DnsExtended {
    fn id(&self) -> DialectId {
        DialectId::DnsExtended
    }

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        LAYOUT.locate(grid)
    }
}
