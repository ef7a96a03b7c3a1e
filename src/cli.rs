use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tidyframe::analyser::logic::*;
use tidyframe::config::{AppSettings, load_app_config, save_app_config};
use tidyframe::utils::{fmt_opt, render_grid};

#[derive(Parser)]
#[command(name = "tidyframe", about = "Clean and inspect uploaded CSV tables")]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deduplicate, index and impute a CSV file, then report what changed
    Wrangle {
        /// Path to the CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Write the cleaned table here (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the cleaned table to the configured output location
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print descriptive statistics of the cleaned table as JSON
    Summary {
        /// Path to the CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Only summarise these columns
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Print the first rows of the cleaned table as JSON
    Head {
        /// Path to the CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Number of rows. Defaults to the configured preview size.
        #[arg(short, long)]
        rows: Option<u32>,
    },
    /// Show or update the saved settings
    Config {
        /// Default number of preview rows
        #[arg(long)]
        preview_rows: Option<u32>,

        /// Largest preview allowed
        #[arg(long)]
        max_preview_rows: Option<u32>,

        /// Directory for cleaned files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    let settings = load_app_config();
    match command {
        Commands::Wrangle {
            file,
            output,
            save,
            json,
        } => {
            let output = output.or_else(|| save.then(|| settings.cleaned_path(&file)));
            handle_wrangle(&file, output, json)
        }
        Commands::Summary { file, columns } => handle_summary(&file, &columns),
        Commands::Head { file, rows } => handle_head(&file, settings.preview_rows(rows)),
        Commands::Config {
            preview_rows,
            max_preview_rows,
            output_dir,
        } => handle_config(settings, preview_rows, max_preview_rows, output_dir),
    }
}

fn wrangle_input(file: &Path) -> Result<Wrangled> {
    wrangle_file(file).with_context(|| format!("Failed to wrangle {}", file.display()))
}

fn handle_wrangle(file: &Path, output: Option<PathBuf>, json: bool) -> Result<()> {
    let wrangled = wrangle_input(file)?;
    let report = report(&wrangled);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = output {
        save_cleaned(&wrangled.table, &path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        println!("Cleaned table saved to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!("Rows after cleaning: {}", report.rows);
    match (&report.index, &report.index_format) {
        (Some(name), Some(format)) => println!("Date index: {name} (format {format})"),
        _ => println!("Date index: none"),
    }
    println!(
        "Duplicate rows removed: {}",
        report.diagnostics.duplicate_rows
    );

    let header = vec!["column".to_owned(), "missing".to_owned()];
    let rows: Vec<Vec<String>> = report
        .diagnostics
        .null_counts
        .iter()
        .map(|(name, count)| vec![name.clone(), count.to_string()])
        .collect();
    println!("{}", render_grid(&header, &rows));

    if !report.diagnostics.unimputed_columns.is_empty() {
        println!(
            "Left with missing values (type not imputable): {}",
            report.diagnostics.unimputed_columns.join(", ")
        );
    }
}

fn handle_summary(file: &Path, columns: &[String]) -> Result<()> {
    let wrangled = wrangle_input(file)?;
    let selected: Vec<&str> = columns.iter().map(String::as_str).collect();
    validate_selection(&wrangled.table, &selected)?;

    let summary: Vec<ColumnSummary> = describe(&wrangled.table)
        .into_iter()
        .filter(|s| selected.is_empty() || selected.contains(&s.name.as_str()))
        .collect();
    for col in &summary {
        if let ColumnStats::Numeric(stats) = &col.stats {
            tracing::debug!(
                "{}: mean {} std {}",
                col.name,
                fmt_opt(stats.mean),
                fmt_opt(stats.std_dev)
            );
        }
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn handle_head(file: &Path, rows: usize) -> Result<()> {
    let wrangled = wrangle_input(file)?;
    let preview = head(&wrangled.table, rows);
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

fn handle_config(
    mut settings: AppSettings,
    preview_rows: Option<u32>,
    max_preview_rows: Option<u32>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let changed = preview_rows.is_some() || max_preview_rows.is_some() || output_dir.is_some();
    if let Some(n) = preview_rows {
        settings.preview_row_limit = n;
    }
    if let Some(n) = max_preview_rows {
        settings.max_preview_rows = n;
    }
    if let Some(dir) = output_dir {
        settings.output_dir = Some(dir);
    }

    if changed {
        save_app_config(&settings).context("Failed to save settings")?;
        tracing::info!("Settings saved");
    }
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
