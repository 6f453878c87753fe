//! Process command - extract data from a single resume file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use vitae_core::{DocumentFormat, ExtractionRecord, FanoutSink, ResultSink, ResumePipeline};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, TXT or DOCX)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the result to the configured object store and table
    #[arg(long)]
    store: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (flat record layout)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let format = DocumentFormat::from_path(&args.input)?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());

    pb.set_message("Loading recognizer...");
    let pipeline = ResumePipeline::from_config(&config)?;

    pb.set_message("Extracting text...");
    let data = fs::read(&args.input)?;
    let record = pipeline.run(&data, format.extension())?;

    if args.store {
        pb.set_message("Saving result...");
        let key = args
            .input
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| args.input.to_string_lossy());
        FanoutSink::from_config(&config.storage).put(&key, &record)?;
        info!("Saved result under {}", config.storage.results_dir().display());
    }

    pb.finish_and_clear();

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &ExtractionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ExtractionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(record.to_flat()?)?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name: {}\n", record.name()));
    output.push_str(&format!("Email: {}\n", record.email()));
    output.push_str(&format!("Phone: {}\n", record.phone()));
    output.push_str(&format!("Skills: {}\n", record.skills().join(", ")));
    output.push_str(&format!("Education: {}\n", record.education().join("; ")));
    output.push_str(&format!("Summary: {}\n", record.summary()));

    output
}
