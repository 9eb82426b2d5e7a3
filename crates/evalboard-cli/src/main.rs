//! evalboard CLI - compare LLM evaluation reports from the terminal

mod config;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use evalboard::prelude::*;
use evalboard::{format_hundredths, sheets, CsvWriteOptions, SummaryCard, ViewResult};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "evalboard")]
#[command(
    author,
    version,
    about = "Compare language-model evaluation reports as tables and charts"
)]
struct Cli {
    /// Config file (default: ./evalboard.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of a workbook with their row counts
    Sheets {
        /// Input workbook (xlsx, csv, json, or a directory of csv files)
        input: Option<PathBuf>,
    },

    /// Build a comparison chart
    Chart {
        /// Input workbook (default: the comparison report)
        input: Option<PathBuf>,

        /// Chart to build
        #[arg(short, long, default_value = "overall")]
        kind: ChartKind,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show a sheet as a score-classified table
    Table {
        /// Input workbook (default: the comparison report, or the model's results)
        input: Option<PathBuf>,

        /// Sheet to show (default: "Model Comparison", or "Detailed Evaluation" with --model)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Read this model's results workbook
        #[arg(short, long, conflicts_with = "input")]
        model: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the summary cards of a model's results
    Summary {
        /// Input results workbook
        input: Option<PathBuf>,

        /// Read this model's results workbook (default: the first model)
        #[arg(short, long, conflicts_with = "input")]
        model: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List the configured models
    Models,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let catalog = config.catalog();

    match cli.command {
        Commands::Sheets { input } => list_sheets(&report_path(&catalog, input)),
        Commands::Chart {
            input,
            kind,
            format,
        } => show_chart(&report_path(&catalog, input), kind, format),
        Commands::Table {
            input,
            sheet,
            model,
            format,
            output,
        } => {
            let (path, selection) = match model {
                Some(model) => {
                    let selection = Selection::new()
                        .with_model(model)
                        .with_sheet(sheet.as_deref().unwrap_or(sheets::DETAILED_EVALUATION));
                    let entry = view(catalog.selected(&selection))?;
                    (entry.file.clone(), selection)
                }
                None => (
                    report_path(&catalog, input),
                    Selection::new().with_sheet(sheet.as_deref().unwrap_or(sheets::MODEL_COMPARISON)),
                ),
            };
            show_table(&path, &selection, format, output.as_deref())
        }
        Commands::Summary {
            input,
            model,
            format,
        } => {
            let path = match input {
                Some(path) => path,
                None => {
                    let mut selection = Selection::new();
                    selection.model = model;
                    view(catalog.selected(&selection))?.file.clone()
                }
            };
            show_summary(&path, format)
        }
        Commands::Models => list_models(&catalog),
    }
}

/// Install the stderr subscriber
///
/// `-v` flags win over `RUST_LOG`; with neither, only warnings are shown.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn report_path(catalog: &ModelCatalog, input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| catalog.report().to_path_buf())
}

fn open(path: &Path) -> Result<Workbook> {
    Workbook::open(path).with_context(|| format!("Failed to open '{}'", path.display()))
}

/// Report a view error with the dashboard's wording
fn view<T>(result: ViewResult<T>) -> Result<T> {
    result.map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    println!("Sheets in '{}':", input.display());
    for (i, sheet) in workbook.sheets().enumerate() {
        println!("  [{}] {} ({} rows)", i, sheet.name(), sheet.row_count());
    }

    Ok(())
}

fn show_chart(input: &Path, kind: ChartKind, format: Format) -> Result<()> {
    let workbook = open(input)?;
    let chart = view(build_chart(&workbook, &Selection::new().with_chart(kind)))?;

    if format == Format::Json {
        return print_json(&chart);
    }
    if format == Format::Text {
        println!("{}", kind.heading());
        println!("{}", kind.description());
        println!();
    }

    let (header, rows) = chart_grid(&chart);
    write_grid(io::stdout().lock(), &header, &rows, format)
}

/// One row per label, one column per series
fn chart_grid(chart: &ChartSpec) -> (Vec<String>, Vec<Vec<String>>) {
    let label_title = chart
        .category_axis
        .as_ref()
        .and_then(|axis| axis.title.clone())
        .unwrap_or_else(|| "Metric".to_string());

    let mut header = vec![label_title];
    header.extend(chart.dataset.series.iter().map(|s| s.name.clone()));

    let rows = chart
        .dataset
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            row.extend(
                chart
                    .dataset
                    .series
                    .iter()
                    .map(|s| format_hundredths(s.values.get(i).copied().unwrap_or(0.0))),
            );
            row
        })
        .collect();

    (header, rows)
}

fn show_table(
    input: &Path,
    selection: &Selection,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let workbook = open(input)?;
    let table = view(build_sheet_table(&workbook, selection))?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        Format::Csv => evalboard::write_table_csv(&table, &mut out, &CsvWriteOptions::default())
            .context("Failed to write CSV")?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &table).context("Failed to write JSON")?;
            writeln!(out)?;
        }
        Format::Text => {
            let header: Vec<String> = table.titles().map(str::to_string).collect();
            let rows: Vec<Vec<String>> = table
                .rows
                .iter()
                .map(|row| {
                    let mut cells: Vec<String> =
                        row.cells.iter().map(|c| c.display.clone()).collect();
                    if row.aggregate {
                        if let Some(first) = cells.first_mut() {
                            first.insert(0, '*');
                        }
                    }
                    cells
                })
                .collect();
            out.write_all(render_grid(&header, &rows).as_bytes())?;
        }
    }
    out.flush()?;

    if let Some(path) = output {
        eprintln!("Wrote {} rows to '{}'", table.rows.len(), path.display());
    }
    Ok(())
}

fn show_summary(input: &Path, format: Format) -> Result<()> {
    let workbook = open(input)?;
    let cards: Vec<SummaryCard> = view(build_summary_cards(&workbook))?;

    if format == Format::Json {
        return print_json(&cards);
    }

    let header = vec!["Metric".to_string(), "Average Score".to_string()];
    let rows: Vec<Vec<String>> = cards
        .iter()
        .map(|card| vec![card.metric.clone(), card.average.clone()])
        .collect();
    write_grid(io::stdout().lock(), &header, &rows, format)
}

fn list_models(catalog: &ModelCatalog) -> Result<()> {
    println!("Report: {}", catalog.report().display());
    for model in catalog.models() {
        println!("  {:<16} {:<16} {}", model.label, model.key, model.file.display());
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    println!("{}", text);
    Ok(())
}

/// Write a header and rows as CSV or as a text grid
fn write_grid<W: Write>(
    mut out: W,
    header: &[String],
    rows: &[Vec<String>],
    format: Format,
) -> Result<()> {
    match format {
        Format::Csv => CsvWriter::write_records(
            Some(header.to_vec()),
            rows,
            &mut out,
            &CsvWriteOptions::default(),
        )
        .context("Failed to write CSV")?,
        Format::Text | Format::Json => out.write_all(render_grid(header, rows).as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

/// Left-aligned columns padded to their widest cell
fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let columns = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (i, row) in std::iter::once(header)
        .chain(rows.iter().map(Vec::as_slice))
        .enumerate()
    {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');

        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}
