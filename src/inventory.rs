use log::{debug, info, warn};

use likert_inventory::builder::ResponseBuilder;
use likert_inventory::table::*;
use likert_inventory::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::inventory::config_reader::*;
use crate::inventory::display::*;
use crate::inventory::sink::*;

pub mod config_reader;
pub mod display;
mod io_common;
mod io_csv;
mod io_json;
mod io_xlsx;
pub mod sink;

#[derive(Debug, Snafu)]
pub enum InventoryError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} does not contain a worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "The workbook {path} contains {count} worksheets, the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("The workbook is empty"))]
    EmptyExcel {},
    #[snafu(display("Cannot read the cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is shorter than the header"))]
    RowTooShort { lineno: usize },
    #[snafu(display("The file {path} has no header row"))]
    MissingHeader { path: String },
    #[snafu(display("Invalid catalog {path}: {source}"))]
    InvalidCatalog {
        source: InventoryErrors,
        path: String,
    },
    #[snafu(display("Invalid reverse flag {value:?} for item {id}"))]
    CatalogReverseFlag { id: String, value: String },
    #[snafu(display("Unknown input type {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No responses to read: provide --input or a configuration file with sources"))]
    MissingSources {},
    #[snafu(display("Missing parent directory"))]
    MissingParentDir {},
    #[snafu(display(
        "The submission of {respondent} has {answered} numeric answers, at least {required} are required"
    ))]
    InsufficientCoverage {
        respondent: String,
        answered: usize,
        required: usize,
    },
    #[snafu(display("Error accessing sink {path}"))]
    SinkIo {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error appending rows to sink {path}"))]
    SinkWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    SummaryMismatch {},
}

pub type InvResult<T> = Result<T, InventoryError>;

/// A submission, as parsed by the readers.
/// This is before the answers are checked against the catalog.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedSubmission {
    /// Where this submission comes from, used in the logs.
    pub id: String,
    pub respondent: Option<String>,
    pub date: Option<String>,
    pub organization: Option<String>,
    pub observations: Option<String>,
    /// Pairs of (item id, raw content).
    pub answers: Vec<(String, String)>,
}

/// The identification of a respondent.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SubmissionInfo {
    pub respondent: String,
    pub date: String,
    pub organization: String,
    pub observations: Option<String>,
}

/// Where the records of accepted submissions are appended.
#[derive(Default)]
pub struct Sinks {
    pub responses: Option<Box<dyn RecordSink>>,
    pub observations: Option<Box<dyn RecordSink>>,
}

fn today() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}

fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

fn submission_info(ps: &ParsedSubmission, default_organization: &str) -> SubmissionInfo {
    let non_empty = |x: &Option<String>| {
        x.as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    SubmissionInfo {
        respondent: non_empty(&ps.respondent).unwrap_or_default(),
        date: non_empty(&ps.date).unwrap_or_else(today),
        organization: non_empty(&ps.organization)
            .unwrap_or_else(|| default_organization.to_string()),
        observations: ps.observations.clone(),
    }
}

/// Builds the response of a submission. Answers to unknown items are dropped.
fn build_response(ps: &ParsedSubmission, catalog: &Catalog) -> Response {
    let mut builder = ResponseBuilder::new(catalog);
    for (item_id, raw) in ps.answers.iter() {
        if let Err(e) = builder.select(item_id, raw) {
            warn!("build_response: submission {}: {}", ps.id, e);
        }
    }
    builder.build()
}

/// Scores a submission, displays it and appends its records to the sinks.
///
/// The summary is displayed before anything is written: if a sink fails, the
/// error is returned but the display is left as it is.
pub fn finalize_submission(
    info: &SubmissionInfo,
    response: &Response,
    catalog: &Catalog,
    rules: &InventoryRules,
    sinks: &mut Sinks,
    timestamp: &str,
) -> InvResult<ScoreSummary> {
    match submission_readiness(response, catalog, rules) {
        Readiness::Ready => {}
        Readiness::Empty => {
            warn!(
                "finalize_submission: {:?} did not give any numeric answer, the scores are empty",
                info.respondent
            );
        }
        Readiness::InsufficientCoverage { answered, required } => {
            return InsufficientCoverageSnafu {
                respondent: info.respondent.clone(),
                answered,
                required,
            }
            .fail();
        }
    }

    let summary = compute_scores(catalog, response);
    println!("{}", render_submission(info, &summary, rules.render_chart));

    persist_submission(info, response, catalog, rules, sinks, timestamp)?;
    Ok(summary)
}

fn persist_submission(
    info: &SubmissionInfo,
    response: &Response,
    catalog: &Catalog,
    rules: &InventoryRules,
    sinks: &mut Sinks,
    timestamp: &str,
) -> InvResult<()> {
    match sinks.responses.as_mut() {
        Some(sink) => {
            let rows: Vec<Vec<String>> = response_records(catalog, response, info, timestamp)
                .iter()
                .map(|r| r.to_row())
                .collect();
            sink.append_rows(&rows)?;
            info!(
                "persist_submission: {} rows appended for {:?}",
                rows.len(),
                info.respondent
            );
        }
        None => {
            debug!("persist_submission: no responses sink, nothing written");
        }
    }

    if !rules.collect_observations {
        return Ok(());
    }
    if let Some(record) = observation_record(info, timestamp) {
        match sinks.observations.as_mut() {
            Some(sink) => {
                sink.append_rows(&[record.to_row()])?;
                info!(
                    "persist_submission: observation appended for {:?}",
                    info.respondent
                );
            }
            None => {
                warn!(
                    "persist_submission: {:?} left an observation but no observations sink is configured",
                    info.respondent
                );
            }
        }
    }
    Ok(())
}

fn read_submissions(cfs: &FileSource, catalog: &Catalog) -> InvResult<Vec<ParsedSubmission>> {
    info!("Attempting to read responses file {:?}", cfs.file_path);
    let provider = cfs.provider();
    match provider.as_str() {
        "json" => io_json::read_json_snapshots(&cfs.file_path),
        "csv" => io_csv::read_csv_responses(&cfs.file_path, cfs, catalog),
        "xlsx" => io_xlsx::read_xlsx_responses(&cfs.file_path, cfs, catalog),
        _ => UnknownProviderSnafu { provider }.fail(),
    }
}

fn build_summary_js(
    config: &InventoryConfig,
    results: &[(SubmissionInfo, ScoreSummary)],
    rejected: &[String],
) -> JSValue {
    let c = OutputConfig {
        survey: config.output_settings.survey_name(),
        organization: config.output_settings.collecting_organization(),
    };
    let results_js: Vec<JSValue> = results
        .iter()
        .map(|(info, summary)| {
            let dimensions: Vec<JSValue> = summary
                .dimensions
                .iter()
                .map(|d| json!({"dimension": d.dimension, "mean": format_mean(d.mean)}))
                .collect();
            json!({
                "respondent": info.respondent,
                "date": info.date,
                "answered": summary.scored_items,
                "overall": format_mean(summary.overall),
                "dimensions": dimensions,
            })
        })
        .collect();
    json!({
        "config": c,
        "results": results_js,
        "rejected": rejected,
    })
}

/// Prints the questionnaire, grouped by dimension.
pub fn print_form(catalog: &Catalog) {
    println!("{}", render_form(catalog));
}

/// Reads all the configured sources, finalizes every submission and writes the summary.
pub fn run_inventory(config: &InventoryConfig, check_summary_path: Option<String>) -> InvResult<()> {
    let rules = config.rules.to_rules();
    info!("rules: {:?}", rules);
    let catalog = config.catalog()?;
    info!(
        "catalog: {} items in {} dimensions",
        catalog.len(),
        catalog.dimensions().len()
    );

    ensure!(!config.sources.is_empty(), MissingSourcesSnafu {});

    let mut data: Vec<ParsedSubmission> = Vec::new();
    for cfs in config.sources.iter() {
        let mut file_data = read_submissions(cfs, &catalog)?;
        data.append(&mut file_data);
    }
    info!("{} submissions read", data.len());

    let mut sinks = config.sinks.open();
    let organization = config.output_settings.collecting_organization();
    let timestamp = now_timestamp();

    let mut results: Vec<(SubmissionInfo, ScoreSummary)> = Vec::new();
    let mut rejected: Vec<String> = Vec::new();
    for ps in data.iter() {
        let info = submission_info(ps, &organization);
        let response = build_response(ps, &catalog);
        debug!("submission {}: {:?}", ps.id, response);
        match finalize_submission(&info, &response, &catalog, &rules, &mut sinks, &timestamp) {
            Ok(summary) => results.push((info, summary)),
            Err(e @ InventoryError::InsufficientCoverage { .. }) => {
                warn!("submission {} rejected: {}", ps.id, e);
                rejected.push(info.respondent.clone());
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        "{} submissions accepted, {} rejected",
        results.len(),
        rejected.len()
    );

    // Assemble the final json
    let result_js = build_summary_js(config, &results, &rejected);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match config.output_settings.output_path.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, pretty_js_stats.as_str()).context(WritingSummarySnafu { path })?;
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return SummaryMismatchSnafu {}.fail();
        }
    }

    Ok(())
}

/// Loads the configuration file (if any) and applies the command line overrides.
pub fn resolve_config(args: &Args) -> InvResult<InventoryConfig> {
    let mut config = match args.config.as_ref() {
        Some(config_path) => {
            let config_p = Path::new(config_path.as_str());
            let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
            read_config(config_path)?.relative_to(root_p)
        }
        None => InventoryConfig::default(),
    };

    if let Some(input) = args.input.as_ref() {
        let provider = args
            .input_type
            .clone()
            .unwrap_or_else(|| guess_provider(input));
        config.sources = vec![FileSource::new(
            &provider,
            input,
            args.excel_worksheet_name.clone(),
        )];
    }
    if let Some(out) = args.out.as_ref() {
        config.output_settings.output_path = Some(out.clone());
    }
    if let Some(p) = args.responses_sink.as_ref() {
        config.sinks.responses_path = Some(p.clone());
    }
    if let Some(p) = args.observations_sink.as_ref() {
        config.sinks.observations_path = Some(p.clone());
    }
    if args.require_minimum_coverage.is_some() {
        config.rules.require_minimum_coverage = args.require_minimum_coverage;
    }
    if args.collect_observations.is_some() {
        config.rules.collect_observations = args.collect_observations;
    }
    if args.render_chart.is_some() {
        config.rules.render_chart = args.render_chart;
    }
    debug!("resolve_config: {:?}", config);
    Ok(config)
}

fn guess_provider(path: &str) -> String {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => "json".to_string(),
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}
