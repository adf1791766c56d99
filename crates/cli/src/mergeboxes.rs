//! mergeboxes - reconcile two OCR detection sets.
//!
//! Fuses a secondary JSON box set into a primary one and emits the merged
//! set as JSON, for pipelines that run two OCR passes over the same image.

mod model;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use layline_core::merge;

use model::{BoxRecord, read_boxes};

/// Merge two OCR detection sets into one JSON box set.
#[derive(Parser, Debug)]
#[command(name = "mergeboxes")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Primary detection set; kept on conflicts
    primary: PathBuf,

    /// Secondary detection set; fused into overlapping primary boxes,
    /// appended otherwise
    secondary: PathBuf,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let primary = read_boxes(&args.primary)?;
    let secondary = read_boxes(&args.secondary)?;
    let merged = merge(&primary, &secondary);

    let records: Vec<BoxRecord> = merged.iter().map(BoxRecord::from_box).collect();
    let json = serde_json::to_string_pretty(&records)?;

    if args.outfile == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    } else {
        fs::write(&args.outfile, json + "\n")
            .with_context(|| format!("writing {}", args.outfile))?;
    }
    Ok(())
}
