//! Extract command - pull structured records out of manifest files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use romaneio_core::{Document, ExtractedRecord, RecordAssembler};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file or glob pattern (.pdf or .json token dump)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }
    info!("Processing {} file(s)", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let assembler = RecordAssembler::new(&config);
    let mut records: Vec<ExtractedRecord> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for path in &files {
        pb.set_message(
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
        );
        let document = match Document::load(path) {
            Ok(doc) => doc,
            Err(err) if args.continue_on_error => {
                warn!(file = %path.display(), %err, "skipping file");
                warnings.push(format!("{}: {}", path.display(), err));
                pb.inc(1);
                continue;
            }
            Err(err) => {
                pb.finish_and_clear();
                return Err(err.into());
            }
        };
        let extraction = assembler.assemble(&document);
        for blocked in &extraction.blocked {
            debug!(file = %document.pdf_name, phone = %blocked, "phone is blocklisted");
        }
        warnings.extend(extraction.warnings);
        records.extend(extraction.records);
        pb.inc(1);
    }

    pb.finish_and_clear();

    for warning in &warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_records(&records, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} record(s) written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Expand a plain path or glob pattern into the list of input files.
pub fn expand_inputs(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let direct = PathBuf::from(input);
    if direct.is_file() {
        return Ok(vec![direct]);
    }
    let files = glob(input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_ascii_lowercase().as_str(), "pdf" | "json")
        })
        .collect();
    Ok(files)
}

fn format_records(records: &[ExtractedRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[ExtractedRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "plate",
        "model",
        "origin",
        "destination",
        "delivery_date",
        "phones",
        "pdf_name",
    ])?;

    for record in records {
        let date = record
            .delivery_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        let phones = record.phones.join(";");
        wtr.write_record([
            record.plate.as_str(),
            record.model.as_deref().unwrap_or_default(),
            record.origin.as_deref().unwrap_or_default(),
            record.destination.as_deref().unwrap_or_default(),
            date.as_str(),
            phones.as_str(),
            record.pdf_name.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ExtractedRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!("Plate: {}\n", record.plate));
        if let Some(model) = &record.model {
            output.push_str(&format!("  Model:       {}\n", model));
        }
        if let Some(origin) = &record.origin {
            output.push_str(&format!("  Origin:      {}\n", origin));
        }
        if let Some(destination) = &record.destination {
            output.push_str(&format!("  Destination: {}\n", destination));
        }
        if let Some(date) = record.delivery_date {
            output.push_str(&format!("  Deliver by:  {}\n", date));
        }
        output.push_str(&format!("  Phones:      {}\n", record.phones.join(", ")));
        output.push_str(&format!("  Source:      {}\n", record.pdf_name));
        output.push('\n');
    }

    output.push_str(&format!("{} record(s)\n", records.len()));
    output
}
