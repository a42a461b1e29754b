//! FILENAME: reshape-engine/src/metric.rs
//! Metric vocabulary: canonical metrics, their output labels and the
//! raw-label rename table shared by every dialect.

use serde::{Deserialize, Serialize};

/// How a metric column is typed in the canonical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Piece counts: parsed, zero-filled, truncated to an integer.
    Count,
    /// Money: parsed and zero-filled as a decimal, never truncated.
    Money,
}

/// Canonical metrics in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    SalesUnits,
    SalesValue,
    StockUnits,
    StockValue,
    StockInTransitUnits,
    CostExVat,
    StockValueExVat,
    SalesValueExVat,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::SalesUnits,
        Metric::SalesValue,
        Metric::StockUnits,
        Metric::StockValue,
        Metric::StockInTransitUnits,
        Metric::CostExVat,
        Metric::StockValueExVat,
        Metric::SalesValueExVat,
    ];

    /// Output column title. Part of the downstream contract.
    pub fn label(self) -> &'static str {
        match self {
            Metric::SalesUnits => "Продажи, шт",
            Metric::SalesValue => "Продажи, руб",
            Metric::StockUnits => "Остатки, шт",
            Metric::StockValue => "Остатки, руб",
            Metric::StockInTransitUnits => "Остатки в пути",
            Metric::CostExVat => "Себестоимость без НДС",
            Metric::StockValueExVat => "Ост. Сумма без НДС",
            Metric::SalesValueExVat => "Продажа без НДС",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::SalesUnits | Metric::StockUnits | Metric::StockInTransitUnits => MetricKind::Count,
            _ => MetricKind::Money,
        }
    }

    /// Maps a raw header label to its canonical metric.
    ///
    /// The exact table is consulted first; labels it does not know are
    /// classified by stem so that "Продажи шт." and similar drift still
    /// land in the right column. Returns `None` for non-metric labels.
    pub fn from_raw_label(raw: &str) -> Option<Metric> {
        let key = normalize_label(raw);
        if key.is_empty() {
            return None;
        }
        RENAME_TABLE
            .iter()
            .find(|(label, _)| normalize_label(label) == key)
            .map(|(_, metric)| *metric)
            .or_else(|| classify_by_stem(&key))
    }
}

/// Raw label -> canonical metric, applied identically for every dialect.
const RENAME_TABLE: &[(&str, Metric)] = &[
    ("Кол-во", Metric::SalesUnits),
    ("Ост. кол-во", Metric::StockUnits),
    ("Ост. пути", Metric::StockInTransitUnits),
    ("Себестоимость без НДС", Metric::CostExVat),
    ("Ост. Сумма без НДС", Metric::StockValueExVat),
    ("Продажа без НДС", Metric::SalesValueExVat),
    ("Продажи, шт", Metric::SalesUnits),
    ("Продажи, руб", Metric::SalesValue),
    ("Остатки, шт", Metric::StockUnits),
    ("Остатки, руб", Metric::StockValue),
    ("Остатки в пути", Metric::StockInTransitUnits),
];

/// Lowercase, trimmed, inner whitespace collapsed to single spaces.
fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn classify_by_stem(key: &str) -> Option<Metric> {
    let sales = key.contains("продаж");
    let stock = key.contains("остат") || key.contains("запас");
    let money = key.contains("руб") || key.contains("сумм");
    let units = key.contains("шт") || key.contains("кол");

    match (sales, stock, money, units) {
        (true, false, true, _) => Some(Metric::SalesValue),
        (true, false, false, true) => Some(Metric::SalesUnits),
        (false, true, true, _) => Some(Metric::StockValue),
        (false, true, false, true) => Some(Metric::StockUnits),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_dns_labels() {
        assert_eq!(Metric::from_raw_label("Кол-во"), Some(Metric::SalesUnits));
        assert_eq!(Metric::from_raw_label(" Ост.  кол-во "), Some(Metric::StockUnits));
        assert_eq!(Metric::from_raw_label("Ост. пути"), Some(Metric::StockInTransitUnits));
        assert_eq!(Metric::from_raw_label("ост. сумма без ндс"), Some(Metric::StockValueExVat));
    }

    #[test]
    fn classifies_drifted_labels_by_stem() {
        assert_eq!(Metric::from_raw_label("Продажи шт."), Some(Metric::SalesUnits));
        assert_eq!(Metric::from_raw_label("Остаток, руб."), Some(Metric::StockValue));
        assert_eq!(Metric::from_raw_label("Запас, шт"), Some(Metric::StockUnits));
    }

    #[test]
    fn ignores_non_metric_labels() {
        assert_eq!(Metric::from_raw_label("Товар"), None);
        assert_eq!(Metric::from_raw_label("Наименование"), None);
        assert_eq!(Metric::from_raw_label("   "), None);
    }

    #[test]
    fn canonical_order_matches_declaration() {
        let mut sorted = Metric::ALL;
        sorted.sort();
        assert_eq!(sorted, Metric::ALL);
        assert_eq!(Metric::SalesUnits.kind(), MetricKind::Count);
        assert_eq!(Metric::CostExVat.kind(), MetricKind::Money);
    }
}
