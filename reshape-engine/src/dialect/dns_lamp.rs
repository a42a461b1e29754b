//! FILENAME: reshape-engine/src/dialect/dns_lamp.rs
//! DNS extended format, "lamp" sub-variant.
//!
//! Same metrics as the extended format, but the product section has no
//! manufacturer code column. The "Код модели" output column is still
//! produced (blank) so both variants share one report shape.
//!
//! Row 0: "Изделие" | "Итого" | store captions
//! Row 1: store codes
//! Row 2: Код, Товар | metric labels per store

use engine::MergeAwareGrid;

use crate::dialect::{DialectDriver, DialectId};
use crate::error::DialectError;
use crate::locator::LabelScanLayout;
use crate::schema::{ProductField, Requirement, Schema};

const LAYOUT: LabelScanLayout = LabelScanLayout {
    section_row: 0,
    field_row: 2,
    metric_row: 2,
    code_row: Some(1),
    first_data_row: 3,
    fields: &[
        (ProductField::Article, Requirement::Required),
        (ProductField::Name, Requirement::Required),
        (ProductField::ModelCode, Requirement::Optional),
    ],
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DnsLamp;

impl DialectDriver for DnsLamp {
    fn id(&self) -> DialectId {
        DialectId::DnsLamp
    }

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        LAYOUT.locate(grid)
    }
}
