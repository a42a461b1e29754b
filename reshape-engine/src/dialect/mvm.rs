//! FILENAME: reshape-engine/src/dialect/mvm.rs
//! MVM format.
//!
//! Product code in column F, name in column G, a 26-column totals area, then
//! per-store blocks from column AH. Above the stores sit a city row and a
//! store code row; the metric label row has "Наименование" in the name
//! column. The export may start with a variable number of filter rows, so
//! the header is searched for below `header_depth`.

use engine::MergeAwareGrid;

use crate::coerce::CoerceOptions;
use crate::dialect::{DialectDriver, DialectId};
use crate::error::DialectError;
use crate::locator::ScannedHeaderLayout;
use crate::schema::Schema;

/// Header depth of the current export format.
pub const CURRENT_HEADER_DEPTH: u32 = 2;
/// Header depth of exports produced before filter rows were added.
pub const LEGACY_HEADER_DEPTH: u32 = 0;

#[derive(Debug, Clone, Copy)]
pub struct Mvm {
    pub header_depth: u32,
}

impl Mvm {
    pub fn with_header_depth(header_depth: u32) -> Self {
        Mvm { header_depth }
    }

    fn layout(&self) -> ScannedHeaderLayout {
        ScannedHeaderLayout {
            header_depth: self.header_depth,
            article_col: 5,
            name_col: 6,
            stores_from: 33,
            name_label: "Наименование",
        }
    }
}

impl Default for Mvm {
    fn default() -> Self {
        Mvm::with_header_depth(CURRENT_HEADER_DEPTH)
    }
}

impl DialectDriver for Mvm {
    fn id(&self) -> DialectId {
        DialectId::Mvm
    }

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError> {
        self.layout().locate(grid)
    }

    fn coerce_options(&self) -> CoerceOptions {
        CoerceOptions { store_name_label: "Город", drop_zero_rows: true, ..CoerceOptions::default() }
    }
}
