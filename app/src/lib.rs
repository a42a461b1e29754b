//! FILENAME: app/src/lib.rs
// PURPOSE: Glue between an upload, the reshape engine and the report writer.
// CONTEXT: `transform` is the core entry point (upload + retailer choice ->
// canonical table); `run_report` adds display configuration and writes the
// finished workbook.

pub mod logging;
pub mod period;

use std::fs;
use std::path::{Path, PathBuf};

use engine::Grid;
use persistence::{load_grid, load_grid_from_bytes, write_report, PersistenceError};
use reshape_engine::{
    DialectError, ReportConfig, ReportSettings, RetailerOverrides, Selection, Selector, Transformed,
};
use thiserror::Error;

pub use period::{format_report_period, localize_month};

/// Shown to the user whenever no table could be produced.
pub const NO_DATA_MESSAGE: &str = "Ошибка обработки. В таблице нет данных.";

/// Product categories offered by the upload form.
pub const CATEGORIES: [&str; 5] = ["Медиаплееры", "СберДевайс", "Аксессуары", "Телевизоры", "Лампы"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the uploaded spreadsheet comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

pub fn load_source(source: Source<'_>) -> Result<Grid, AppError> {
    let grid = match source {
        Source::Path(path) => load_grid(path)?,
        Source::Bytes(bytes) => load_grid_from_bytes(bytes)?,
    };
    Ok(grid)
}

/// Reads the upload and reshapes it with the dialect plan for `selection`.
pub fn transform(source: Source<'_>, selection: Selection) -> Result<Transformed, AppError> {
    let grid = load_source(source)?;
    let mut selector = Selector::new(selection);
    let transformed = selector.run(&grid)?;

    for warning in &transformed.table.warnings {
        log::warn!(
            target: "app::transform",
            "row {} column '{}': '{}' replaced with 0",
            warning.row + 1,
            warning.column,
            warning.raw
        );
    }
    log::info!(
        target: "app::transform",
        "{} ({}) -> {} rows",
        selection.retailer,
        transformed.dialect,
        transformed.table.len()
    );
    Ok(transformed)
}

/// Everything needed for one report besides the upload itself.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub selection: Selection,
    pub report: ReportConfig,
    pub overrides: RetailerOverrides,
    /// Defaults to `default_output_name` in the current directory.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ReportOutcome {
    pub transformed: Transformed,
    pub settings: ReportSettings,
    pub output: PathBuf,
}

/// "{category}_{company}_{period}.xlsx"
pub fn default_output_name(settings: &ReportSettings) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.xlsx",
        settings.category, settings.company_name, settings.report_period
    ))
}

pub fn load_overrides(path: &Path) -> Result<RetailerOverrides, AppError> {
    let json = fs::read_to_string(path)?;
    RetailerOverrides::from_json(&json).map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
}

/// Removes a previous report at `path` so a failed run never leaves it behind.
fn clear_previous(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        log::info!(target: "app::report", "removing previous report {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Full run: read, reshape, resolve display settings, write the workbook.
pub fn run_report(source: Source<'_>, request: &ReportRequest) -> Result<ReportOutcome, AppError> {
    if let Some(path) = &request.output {
        clear_previous(path)?;
    }
    if !CATEGORIES.contains(&request.report.category.as_str()) {
        log::warn!(target: "app::report", "category '{}' is not a known category", request.report.category);
    }

    let transformed = transform(source, request.selection)?;
    let retailer = request.overrides.resolve(transformed.dialect);
    let settings = ReportSettings::new(&retailer, &request.report);

    let output = match &request.output {
        Some(path) => path.clone(),
        None => {
            let path = default_output_name(&settings);
            clear_previous(&path)?;
            path
        }
    };
    write_report(&transformed.table, &settings, &output)?;

    Ok(ReportOutcome { transformed, settings, output })
}
