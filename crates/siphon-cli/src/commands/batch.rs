//! Batch command - run many documents through one template set.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use siphon_core::TemplateSet;

use super::extract::{render_attributes, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Template configuration file (JSON)
    #[arg(short, long)]
    templates: PathBuf,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of one processed file.
struct FileResult {
    path: PathBuf,
    attributes: usize,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let templates = TemplateSet::from_json_file(&args.templates)?;

    let files: Vec<PathBuf> = glob(&args.input)?.filter_map(|entry| entry.ok()).collect();
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results = Vec::new();
    let mut failures = 0usize;

    for path in &files {
        progress.set_message(path.display().to_string());

        let document = match fs::read_to_string(path) {
            Ok(document) => document,
            Err(read_error) => {
                failures += 1;
                error!("failed to read {}: {read_error}", path.display());
                if args.continue_on_error {
                    progress.inc(1);
                    continue;
                }
                progress.abandon();
                return Err(read_error.into());
            }
        };

        let attributes = templates.parse_text(&document);
        debug!(
            "{}: extracted {} attributes",
            path.display(),
            attributes.len()
        );

        let rendered = render_attributes(&attributes, args.format)?;
        match &args.output_dir {
            Some(dir) => {
                let file_name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "output".to_string());
                let extension = match args.format {
                    OutputFormat::Json => "json",
                    OutputFormat::Text => "txt",
                };
                fs::write(dir.join(format!("{file_name}.{extension}")), &rendered)?;
            }
            None => {
                progress.suspend(|| {
                    println!("{} {}", style("▶").cyan(), path.display());
                    println!("{rendered}");
                });
            }
        }

        results.push(FileResult {
            path: path.clone(),
            attributes: attributes.len(),
        });
        progress.inc(1);
    }

    progress.finish_with_message("Done");

    let extracted: usize = results.iter().map(|result| result.attributes).sum();
    let empty = results
        .iter()
        .filter(|result| result.attributes == 0)
        .count();
    for result in results.iter().filter(|result| result.attributes == 0) {
        debug!("no template matched {}", result.path.display());
    }

    println!(
        "{} Processed {} files in {:.2}s: {} attributes extracted, {} files unmatched, {} failures",
        style("✓").green(),
        results.len(),
        start.elapsed().as_secs_f64(),
        extracted,
        empty,
        failures
    );

    Ok(())
}
