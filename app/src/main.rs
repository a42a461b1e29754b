//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point: one upload in, one report workbook out.
// FORMAT: log lines are seq|level|category|message on stderr

use std::path::PathBuf;
use std::process::ExitCode;

use app_lib::logging;
use app_lib::{format_report_period, load_overrides, run_report, ReportRequest, Source, NO_DATA_MESSAGE};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use reshape_engine::{DnsFormat, ReportConfig, Retailer, RetailerOverrides, Selection};

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum RetailerArg {
    Dns,
    Mvm,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum FormatArg {
    New,
    Extended,
    Old,
}

#[derive(Parser)]
#[command(name = "retail-report")]
#[command(about = "Convert a retailer sales/stock export into a long-format report workbook")]
#[command(version)]
struct Cli {
    #[arg(help = "Path to the retailer export (xlsx, xls or ods)")]
    input: PathBuf,
    #[arg(long, short, value_enum, help = "Retailer the export comes from")]
    retailer: RetailerArg,
    #[arg(long, short, value_enum, default_value = "extended", help = "DNS export format")]
    format: FormatArg,
    #[arg(long, short, value_name = "YYYY-MM-DD", help = "Report date (defaults to today)")]
    period: Option<NaiveDate>,
    #[arg(long, short, default_value = "СберДевайс", help = "Product category; also the sheet name")]
    category: String,
    #[arg(long, short, help = "Output path (defaults to {category}_{company}_{period}.xlsx)")]
    output: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "JSON overrides of retailer display presets, keyed by dialect id")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Mirror log lines into this file")]
    log_file: Option<PathBuf>,
    #[arg(long, short, action = clap::ArgAction::Count, help = "More log output (-v debug, -vv trace)")]
    verbose: u8,
}

impl Cli {
    fn selection(&self) -> Selection {
        match self.retailer {
            RetailerArg::Mvm => Selection::mvm(),
            RetailerArg::Dns => Selection::dns(match self.format {
                FormatArg::New => DnsFormat::New,
                FormatArg::Extended => DnsFormat::Extended,
                FormatArg::Old => DnsFormat::Old,
            }),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(logging::resolve_level(cli.verbose), cli.log_file.as_deref()) {
        eprintln!("[LOG_INIT] {}", e);
    }

    let overrides = match &cli.config {
        Some(path) => match load_overrides(path) {
            Ok(overrides) => overrides,
            Err(e) => {
                log::error!(target: "app::cli", "{}", e);
                return ExitCode::from(2);
            }
        },
        None => RetailerOverrides::default(),
    };

    let date = cli.period.unwrap_or_else(|| Local::now().date_naive());
    let request = ReportRequest {
        selection: cli.selection(),
        report: ReportConfig { report_period: format_report_period(date), category: cli.category.clone() },
        overrides,
        output: cli.output.clone(),
    };

    log::info!(
        target: "app::cli",
        "{} export {} for '{}' ({})",
        request.selection.retailer,
        cli.input.display(),
        request.report.category,
        request.report.report_period
    );
    if request.selection.retailer == Retailer::Mvm && cli.format != FormatArg::Extended {
        log::warn!(target: "app::cli", "--format only applies to DNS exports, ignored");
    }

    match run_report(Source::Path(&cli.input), &request) {
        Ok(outcome) => {
            println!(
                "{} rows ({}{}) -> {}",
                outcome.transformed.table.len(),
                outcome.transformed.dialect,
                if outcome.transformed.fell_back { ", fallback" } else { "" },
                outcome.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!(target: "app::cli", "{}", e);
            eprintln!("{} ({})", NO_DATA_MESSAGE, e);
            ExitCode::FAILURE
        }
    }
}
