//! FILENAME: reshape-engine/src/selector.rs
//! Dialect Selector - picks and runs the driver for a retailer choice.
//!
//! Each selection maps to a `DialectPlan`: one primary driver and at most one
//! fallback guarded by an error predicate. The fallback's result is final, so
//! no selection is ever retried more than once.

use std::fmt;
use std::str::FromStr;

use engine::MergeAwareGrid;
use serde::{Deserialize, Serialize};

use crate::dialect::{driver_for, DialectDriver, DialectId, DnsLamp, Mvm, LEGACY_HEADER_DEPTH};
use crate::error::DialectError;
use crate::table::CanonicalTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retailer {
    Dns,
    Mvm,
}

impl FromStr for Retailer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dns" | "днс" => Ok(Retailer::Dns),
            "mvm" | "мвм" => Ok(Retailer::Mvm),
            other => Err(format!("unknown retailer '{}'", other)),
        }
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retailer::Dns => f.write_str("DNS"),
            Retailer::Mvm => f.write_str("MVM"),
        }
    }
}

/// Export format choice offered for DNS uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsFormat {
    New,
    #[default]
    Extended,
    Old,
}

impl FromStr for DnsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "новый" => Ok(DnsFormat::New),
            "extended" | "расширенный" => Ok(DnsFormat::Extended),
            "old" | "старый" => Ok(DnsFormat::Old),
            other => Err(format!("unknown DNS format '{}'", other)),
        }
    }
}

/// What the caller asked for: a retailer and, for DNS, a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub retailer: Retailer,
    #[serde(default)]
    pub dns_format: DnsFormat,
}

impl Selection {
    pub fn dns(format: DnsFormat) -> Self {
        Selection { retailer: Retailer::Dns, dns_format: format }
    }

    pub fn mvm() -> Self {
        Selection { retailer: Retailer::Mvm, dns_format: DnsFormat::default() }
    }
}

/// Alternate driver tried once when the primary fails with a matching error.
pub struct Fallback {
    pub driver: Box<dyn DialectDriver>,
    pub retry_on: fn(&DialectError) -> bool,
}

pub struct DialectPlan {
    pub primary: Box<dyn DialectDriver>,
    pub fallback: Option<Fallback>,
}

impl DialectPlan {
    pub fn for_selection(selection: Selection) -> Self {
        match (selection.retailer, selection.dns_format) {
            (Retailer::Dns, DnsFormat::New) => DialectPlan::single(DialectId::DnsNew),
            (Retailer::Dns, DnsFormat::Old) => DialectPlan::single(DialectId::DnsOld),
            (Retailer::Dns, DnsFormat::Extended) => DialectPlan {
                primary: driver_for(DialectId::DnsExtended),
                fallback: Some(Fallback {
                    driver: Box::new(DnsLamp),
                    retry_on: DialectError::is_field_resolution,
                }),
            },
            (Retailer::Mvm, _) => DialectPlan {
                primary: Box::new(Mvm::default()),
                fallback: Some(Fallback {
                    driver: Box::new(Mvm::with_header_depth(LEGACY_HEADER_DEPTH)),
                    retry_on: DialectError::is_lookup,
                }),
            },
        }
    }

    fn single(id: DialectId) -> Self {
        DialectPlan { primary: driver_for(id), fallback: None }
    }
}

/// A successful selector run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub table: CanonicalTable,
    /// Dialect whose driver produced the table.
    pub dialect: DialectId,
    pub fell_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Selecting,
    Running(DialectId),
}

pub struct Selector {
    plan: DialectPlan,
    state: SelectorState,
}

impl Selector {
    pub fn new(selection: Selection) -> Self {
        Selector::with_plan(DialectPlan::for_selection(selection))
    }

    pub fn with_plan(plan: DialectPlan) -> Self {
        Selector { plan, state: SelectorState::Selecting }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn run(&mut self, grid: &dyn MergeAwareGrid) -> Result<Transformed, DialectError> {
        if grid.is_empty() {
            return Err(DialectError::EmptyInput);
        }

        let primary = self.plan.primary.id();
        self.state = SelectorState::Running(primary);
        log::info!(target: "reshape::select", "running dialect {}", primary);

        let err = match self.plan.primary.run(grid) {
            Ok(table) => return Ok(Transformed { table, dialect: primary, fell_back: false }),
            Err(err) => err,
        };

        let fallback = match &self.plan.fallback {
            Some(fallback) if (fallback.retry_on)(&err) => fallback,
            _ => return Err(err),
        };

        let dialect = fallback.driver.id();
        log::warn!(
            target: "reshape::select",
            "dialect {} failed ({}), retrying once with {}",
            primary,
            err,
            dialect
        );
        self.state = SelectorState::Running(dialect);
        let table = fallback.driver.run(grid)?;
        Ok(Transformed { table, dialect, fell_back: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_russian_and_english_choices() {
        assert_eq!("Расширенный".parse::<DnsFormat>(), Ok(DnsFormat::Extended));
        assert_eq!("old".parse::<DnsFormat>(), Ok(DnsFormat::Old));
        assert_eq!("МВМ".parse::<Retailer>(), Ok(Retailer::Mvm));
        assert!("eldorado".parse::<Retailer>().is_err());
    }

    #[test]
    fn plans_match_selection() {
        let plan = DialectPlan::for_selection(Selection::dns(DnsFormat::New));
        assert_eq!(plan.primary.id(), DialectId::DnsNew);
        assert!(plan.fallback.is_none());

        let plan = DialectPlan::for_selection(Selection::dns(DnsFormat::Extended));
        let fallback = plan.fallback.expect("extended has a fallback");
        assert_eq!(fallback.driver.id(), DialectId::DnsLamp);
        assert!((fallback.retry_on)(&DialectError::MissingRequiredField { labels: vec![], row: 0 }));
        assert!(!(fallback.retry_on)(&DialectError::NoStoresFound { row: 0 }));

        let plan = DialectPlan::for_selection(Selection::mvm());
        assert_eq!(plan.primary.id(), DialectId::Mvm);
        assert!(plan.fallback.is_some());
    }

    #[test]
    fn empty_grid_fails_before_selecting() {
        let mut selector = Selector::new(Selection::mvm());
        assert_eq!(selector.run(&engine::Grid::new()), Err(DialectError::EmptyInput));
        assert_eq!(selector.state(), SelectorState::Selecting);
    }
}
