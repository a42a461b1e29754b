//! FILENAME: reshape-engine/src/dialect/mod.rs
//! Dialect Drivers - one per retailer layout variant.
//!
//! Every driver is the same three-step pipeline (locate, expand, coerce);
//! dialects differ only in how they locate the schema and in their coercion
//! policy, so only `id` and `locate` are mandatory.

mod dns_extended;
mod dns_lamp;
mod dns_new;
mod dns_old;
mod mvm;

use std::fmt;
use std::str::FromStr;

use engine::MergeAwareGrid;
use serde::{Deserialize, Serialize};

use crate::coerce::{self, CoerceOptions};
use crate::error::DialectError;
use crate::expand::{self, MetricRecord};
use crate::schema::Schema;
use crate::table::CanonicalTable;

pub use dns_extended::DnsExtended;
pub use dns_lamp::DnsLamp;
pub use dns_new::DnsNew;
pub use dns_old::DnsOld;
pub use mvm::{Mvm, CURRENT_HEADER_DEPTH, LEGACY_HEADER_DEPTH};

/// Identifier of a concrete layout dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialectId {
    DnsNew,
    DnsExtended,
    DnsLamp,
    DnsOld,
    Mvm,
}

impl DialectId {
    pub const ALL: [DialectId; 5] = [
        DialectId::DnsNew,
        DialectId::DnsExtended,
        DialectId::DnsLamp,
        DialectId::DnsOld,
        DialectId::Mvm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DialectId::DnsNew => "dns-new",
            DialectId::DnsExtended => "dns-extended",
            DialectId::DnsLamp => "dns-lamp",
            DialectId::DnsOld => "dns-old",
            DialectId::Mvm => "mvm",
        }
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DialectId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown dialect '{}'", s))
    }
}

/// A complete "raw grid -> canonical table" transform for one layout.
pub trait DialectDriver {
    fn id(&self) -> DialectId;

    fn locate(&self, grid: &dyn MergeAwareGrid) -> Result<Schema, DialectError>;

    fn coerce_options(&self) -> CoerceOptions {
        CoerceOptions::default()
    }

    fn expand(&self, grid: &dyn MergeAwareGrid, schema: &Schema) -> Vec<MetricRecord> {
        expand::expand(grid, schema)
    }

    fn coerce(&self, records: Vec<MetricRecord>, schema: &Schema) -> CanonicalTable {
        coerce::coerce(records, schema, &self.coerce_options())
    }

    fn run(&self, grid: &dyn MergeAwareGrid) -> Result<CanonicalTable, DialectError> {
        if grid.is_empty() {
            return Err(DialectError::EmptyInput);
        }
        let schema = self.locate(grid)?;
        let records = self.expand(grid, &schema);
        let table = self.coerce(records, &schema);
        log::info!(
            target: "reshape::dialect",
            "{} produced {} rows x {} columns",
            self.id(),
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }
}

/// Driver instance for a dialect id, with its default parameters.
pub fn driver_for(id: DialectId) -> Box<dyn DialectDriver> {
    match id {
        DialectId::DnsNew => Box::new(DnsNew),
        DialectId::DnsExtended => Box::new(DnsExtended),
        DialectId::DnsLamp => Box::new(DnsLamp),
        DialectId::DnsOld => Box::new(DnsOld),
        DialectId::Mvm => Box::new(Mvm::default()),
    }
}
