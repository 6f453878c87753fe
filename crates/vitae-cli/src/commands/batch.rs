//! Batch processing command for multiple resume files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use vitae_core::{DocumentSource, FanoutSink, FsDocumentSource, ProcessOutcome, ResumePipeline};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input files
    #[arg(required = true)]
    input: String,

    /// Object store root for results (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Do not upsert results into the flat record table
    #[arg(long)]
    no_table: bool,
}

/// Outcome of one file plus its wall-clock cost.
struct BatchEntry {
    outcome: ProcessOutcome,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(output_dir) = &args.output_dir {
        config.storage.object_root = output_dir.clone();
    }
    if args.no_table {
        config.storage.table_path = None;
    }

    let source = Arc::new(
        FsDocumentSource::new(args.input.clone()).with_extensions(&config.storage.extensions),
    );
    let keys = source.list()?;

    if keys.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        keys.len()
    );

    let pipeline = Arc::new(ResumePipeline::from_config(&config)?);
    let sink = Arc::new(FanoutSink::from_config(&config.storage));

    let pb = ProgressBar::new(keys.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Set on the first failure unless continuing; nothing new starts afterwards.
    let stop = Arc::new(AtomicBool::new(false));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(keys.len());

    for key in keys {
        let permit = semaphore.clone().acquire_owned().await?;
        if stop.load(Ordering::SeqCst) {
            break;
        }

        let source = source.clone();
        let pipeline = pipeline.clone();
        let sink = sink.clone();
        let stop = stop.clone();
        let continue_on_error = args.continue_on_error;
        let task_key = key.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            if stop.load(Ordering::SeqCst) {
                return None;
            }

            let file_start = Instant::now();
            let outcome = match source.fetch(&task_key) {
                Ok(document) => pipeline.process(&document, sink.as_ref()),
                Err(e) => ProcessOutcome::Error {
                    file: task_key,
                    error: e.to_string(),
                },
            };
            if !outcome.is_success() && !continue_on_error {
                stop.store(true, Ordering::SeqCst);
            }

            Some(BatchEntry {
                outcome,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            })
        });
        handles.push((key, handle));
    }

    let mut entries = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for (key, handle) in handles {
        let entry = match handle.await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("Skipped {} after an earlier failure", key);
                continue;
            }
            Err(e) => {
                if !args.continue_on_error {
                    stop.store(true, Ordering::SeqCst);
                }
                BatchEntry {
                    outcome: ProcessOutcome::Error {
                        file: key,
                        error: format!("worker failed: {e}"),
                    },
                    processing_time_ms: 0,
                }
            }
        };

        let line = serde_json::to_string(&entry.outcome)?;
        pb.suspend(|| println!("{}", line));
        pb.inc(1);

        if let ProcessOutcome::Error { file, error: message } = &entry.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", file, message);
            } else {
                error!("Failed to process {}: {}", file, message);
                first_error.get_or_insert_with(|| message.clone());
            }
        }

        entries.push(entry);
    }

    if let Some(message) = first_error {
        pb.abandon();
        anyhow::bail!("Processing failed: {}", message);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &entries)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = entries.iter().filter(|e| !e.outcome.is_success()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(entries.len() - failed.len()).green(),
        style(failed.len()).red()
    );
    debug!("Results stored under {}", config.storage.results_dir().display());

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &failed {
            if let ProcessOutcome::Error { file, error } = &entry.outcome {
                println!("  - {}: {}", file, error);
            }
        }
    }

    Ok(())
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["filename", "status", "processing_time_ms", "error"])?;

    for entry in entries {
        let file = entry.outcome.file();
        let filename = Path::new(file)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(file);
        let elapsed = entry.processing_time_ms.to_string();

        match &entry.outcome {
            ProcessOutcome::Success { .. } => {
                wtr.write_record([filename, "success", &elapsed, ""])?;
            }
            ProcessOutcome::Error { error, .. } => {
                wtr.write_record([filename, "error", &elapsed, error])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
