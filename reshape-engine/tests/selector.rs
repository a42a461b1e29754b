mod common;

use common::products;
use engine::Grid;
use reshape_engine::dialect::{DnsLamp, Mvm, LEGACY_HEADER_DEPTH};
use reshape_engine::{
    transform, DialectDriver, DialectError, DialectId, DnsFormat, Selection, Selector, SelectorState,
};

const METRICS: [&str; 4] = ["Кол-во", "Ост. кол-во", "Себестоимость без НДС", "Ост. Сумма без НДС"];

#[test]
fn extended_choice_falls_back_to_lamp() {
    let grid = common::dns_lamp(&[("Москва", 11.0), ("Тула", 12.0)], &products(), &METRICS);
    let mut selector = Selector::new(Selection::dns(DnsFormat::Extended));
    let result = selector.run(&grid).unwrap();

    assert!(result.fell_back);
    assert_eq!(result.dialect, DialectId::DnsLamp);
    assert_eq!(selector.state(), SelectorState::Running(DialectId::DnsLamp));
    assert_eq!(result.table, DnsLamp.run(&grid).unwrap());
}

#[test]
fn extended_choice_runs_extended_when_it_fits() {
    let grid = common::dns_extended(&[("Москва", 11.0)], &products(), &METRICS);
    let result = transform(&grid, Selection::dns(DnsFormat::Extended)).unwrap();
    assert!(!result.fell_back);
    assert_eq!(result.dialect, DialectId::DnsExtended);
    assert_eq!(result.table.len(), 3);
}

#[test]
fn extended_without_merge_data_is_not_mistaken_for_lamp() {
    let merged = common::dns_extended(&[("Москва", 11.0), ("Тула", 12.0)], &products(), &METRICS);
    let grid = common::without_merges(&merged);
    assert!(grid.merged_regions().is_empty());

    let result = transform(&grid, Selection::dns(DnsFormat::Extended)).unwrap();
    assert!(!result.fell_back);
    assert_eq!(result.dialect, DialectId::DnsExtended);
    assert_eq!(result.table, transform(&merged, Selection::dns(DnsFormat::Extended)).unwrap().table);
}

#[test]
fn new_and_old_choices_never_fall_back() {
    let grid = common::dns_lamp(&[("Москва", 11.0)], &products(), &METRICS);
    let err = transform(&grid, Selection::dns(DnsFormat::New)).unwrap_err();
    assert!(err.is_field_resolution());

    let grid = common::dns_new(&["Москва"], &products());
    let err = transform(&grid, Selection::dns(DnsFormat::Old)).unwrap_err();
    assert!(matches!(err, DialectError::NoStoresFound { .. }));
}

#[test]
fn mvm_retries_with_legacy_header_depth() {
    let grid = common::mvm(&[("Москва", 101.0), ("Тула", 201.0)], &products(), 1);
    let result = transform(&grid, Selection::mvm()).unwrap();

    assert!(result.fell_back);
    assert_eq!(result.dialect, DialectId::Mvm);
    assert_eq!(result.table, Mvm::with_header_depth(LEGACY_HEADER_DEPTH).run(&grid).unwrap());
    assert_eq!(result.table.len(), 3 * 2);
}

#[test]
fn mvm_current_format_needs_no_retry() {
    let grid = common::mvm(&[("Москва", 101.0)], &products(), 3);
    let result = transform(&grid, Selection::mvm()).unwrap();
    assert!(!result.fell_back);
    assert_eq!(result.table.len(), 3);
}

#[test]
fn no_stores_is_not_retried() {
    let grid = Grid::from_rows(vec![
        vec!["Изделие", "", "", "Итого", ""],
        vec!["", "", "", "", ""],
        vec!["Код", "Товар", "КодПроизводителя", "Кол-во", "Ост. кол-во"],
    ]);
    let mut with_merges = grid.clone();
    with_merges.add_merge(engine::MergedRegion::new(0, 0, 1, 2));
    with_merges.add_merge(engine::MergedRegion::new(0, 3, 1, 4));

    let mut selector = Selector::new(Selection::dns(DnsFormat::Extended));
    assert!(matches!(selector.run(&with_merges), Err(DialectError::NoStoresFound { .. })));
    assert_eq!(selector.state(), SelectorState::Running(DialectId::DnsExtended));
}

#[test]
fn empty_input_is_reported_immediately() {
    for selection in [Selection::dns(DnsFormat::New), Selection::dns(DnsFormat::Extended), Selection::mvm()] {
        assert_eq!(transform(&Grid::new(), selection).unwrap_err(), DialectError::EmptyInput);
    }
}

#[test]
fn failing_fallback_error_propagates() {
    let grid = Grid::from_rows(vec![vec!["Отчет"], vec!["без данных"]]);
    let err = transform(&grid, Selection::mvm()).unwrap_err();
    assert!(matches!(err, DialectError::StructureMismatch { .. }));
}
