//! FILENAME: tests/test_report.rs
//! End-to-end runs: xlsx upload on disk -> report workbook on disk.

mod common;

use app_lib::{run_report, transform, AppError, ReportRequest, Source};
use calamine::{open_workbook, Data, Reader, Xlsx};
use reshape_engine::{
    DialectError, DialectId, DnsFormat, MetricValue, ReportConfig, RetailerOverrides, Selection,
};
use tempfile::tempdir;

fn request(selection: Selection, output: std::path::PathBuf) -> ReportRequest {
    ReportRequest {
        selection,
        report: ReportConfig { report_period: "01 июл 2025".to_string(), category: "СберДевайс".to_string() },
        overrides: RetailerOverrides::default(),
        output: Some(output),
    }
}

#[test]
fn test_dns_new_report() {
    let dir = tempdir().unwrap();
    let upload = common::dns_new_upload(dir.path());
    let output = dir.path().join("report.xlsx");

    let outcome = run_report(Source::Path(&upload), &request(Selection::dns(DnsFormat::New), output.clone())).unwrap();
    assert_eq!(outcome.transformed.dialect, DialectId::DnsNew);
    assert_eq!(outcome.transformed.table.len(), 6);
    assert_eq!(outcome.settings.table_display_name, "DNS_data");

    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    let range = workbook.worksheet_range("СберДевайс").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("СберДевайс в ДНС - 01 июл 2025".to_string()))
    );
    // Header on row 3, six data rows, totals on row 10.
    assert_eq!(range.get_value((2, 3)), Some(&Data::String("Магазин".to_string())));
    assert_eq!(range.get_value((9, 0)), Some(&Data::String("Итого".to_string())));
}

#[test]
fn test_extended_choice_falls_back_to_lamp_upload() {
    let dir = tempdir().unwrap();
    let upload = common::dns_lamp_upload(dir.path());
    let output = dir.path().join("lamp.xlsx");

    let outcome =
        run_report(Source::Path(&upload), &request(Selection::dns(DnsFormat::Extended), output.clone())).unwrap();
    let transformed = &outcome.transformed;
    assert!(transformed.fell_back);
    assert_eq!(transformed.dialect, DialectId::DnsLamp);
    assert_eq!(outcome.settings.table_display_name, "DNS_data_extended");
    assert_eq!(outcome.settings.start_summation_column, "F");

    let table = &transformed.table;
    assert_eq!(table.headers()[4], "Код магазина");
    assert!(table.rows.iter().all(|r| r.model_code.is_empty() && r.store_code == Some(101)));
    let money = table.metric_index(reshape_engine::Metric::StockValueExVat).unwrap();
    assert!(table.rows.iter().any(|r| r.metrics[money] == MetricValue::Money(1520.75)));
    assert!(output.exists());
}

#[test]
fn test_mvm_legacy_header_and_duplicates() {
    let dir = tempdir().unwrap();
    let upload = common::mvm_legacy_upload(dir.path());
    let bytes = std::fs::read(&upload).unwrap();

    let transformed = transform(Source::Bytes(&bytes), Selection::mvm()).unwrap();
    assert!(transformed.fell_back);
    let table = &transformed.table;
    assert_eq!(table.headers()[2], "Город");

    // 9002 sold and stocked nothing anywhere; 9001 is listed twice and summed.
    assert!(table.rows.iter().all(|r| r.article == 9001));
    let moscow_second = table.rows.iter().find(|r| r.store_code == Some(302)).unwrap();
    assert_eq!(moscow_second.store_name, "Москва");
    assert_eq!(moscow_second.metrics[0], MetricValue::Count(2));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_wrong_format_reports_error_and_leaves_no_file() {
    let dir = tempdir().unwrap();
    let upload = common::dns_lamp_upload(dir.path());
    let output = dir.path().join("stale.xlsx");
    std::fs::write(&output, b"previous run").unwrap();

    let err = run_report(Source::Path(&upload), &request(Selection::dns(DnsFormat::New), output.clone())).unwrap_err();
    assert!(matches!(err, AppError::Dialect(DialectError::MissingRequiredField { .. })));
    assert!(!output.exists());
}
