//! FILENAME: reshape-engine/src/dialect/dns_new.rs
//! DNS "new" format: two header rows, no store codes, unit metrics only.
//!
//! Row 0: "Изделие" | "Итого" | store captions
//! Row 1: Код, Товар, КодПроизводителя | metric labels per store

use engine::MergeAwareGrid;

use crate::dialect::{DialectDriver, DialectId};
use crate::error::DialectError;
use crate::locator::LabelScanLayout;
use crate::schema::{ProductField, Requirement, Schema};

const LAYOUT: LabelScanLayout = LabelScanLayout {
    section_row: 0,
    field_row: 1,
    metric_row: 1,
    code_row: None,
    first_data_row: 2,
    fields: &[
        (ProductField::Article, Requirement::Required),
        (ProductField::Name, Requirement::Required),
        (ProductField::ModelCode, Requirement::Required),
    ],
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DnsNew;

impl DialectDriver for DnsNew {
    fn id(&self) -> DialectId {
        DialectId::DnsNew
    }

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        LAYOUT.locate(grid)
    }
}
