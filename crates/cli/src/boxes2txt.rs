//! boxes2txt - reconstruct readable text from OCR bounding boxes.
//!
//! Reads a JSON array of detections (text plus bounding box), optionally
//! merges a second detection set, and prints the reconstructed layout.

mod model;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use layline_core::{DictionaryValidator, FormatOptions, TableStyle, YAxis, format, merge, score};

use model::read_boxes;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Style {
    /// Markdown-style pipe tables (default)
    #[default]
    Pipes,
    /// Space-aligned columns without pipes
    Aligned,
}

/// Reconstruct readable text layout from OCR bounding boxes.
#[derive(Parser, Debug)]
#[command(name = "boxes2txt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON array of { "text", "bbox": [x0, y0, x1, y1] },
    /// or "-" for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Merge a second detection set into the input before formatting
    #[arg(long = "merge", value_name = "SECOND.json")]
    merge: Option<PathBuf>,

    /// Disable table detection; render every line as plain text
    #[arg(long = "no-tables", action = ArgAction::SetTrue)]
    no_tables: bool,

    /// Omit the separator row under a table's first row
    #[arg(long = "no-header-separator", action = ArgAction::SetTrue)]
    no_header_separator: bool,

    /// Table rendering style
    #[arg(long, value_enum, default_value = "pipes")]
    style: Style,

    /// Treat the y axis as growing downward (image coordinates)
    #[arg(long = "y-down", action = ArgAction::SetTrue)]
    y_down: bool,

    /// Score the output against a word list (one word per line); the score
    /// is printed to stderr
    #[arg(long = "score", value_name = "DICT")]
    score: Option<PathBuf>,

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

fn load_dictionary(path: &Path) -> Result<DictionaryValidator> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut words = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(DictionaryValidator::new(words))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut boxes = read_boxes(&args.input)?;
    if let Some(second) = &args.merge {
        let secondary = read_boxes(second)?;
        boxes = merge(&boxes, &secondary);
    }

    let options = FormatOptions {
        tables: !args.no_tables,
        header_separator: !args.no_header_separator,
        table_style: match args.style {
            Style::Pipes => TableStyle::Pipes,
            Style::Aligned => TableStyle::Aligned,
        },
        y_axis: if args.y_down {
            YAxis::Downward
        } else {
            YAxis::Upward
        },
    };
    let text = format(&boxes, &options);

    if let Some(dict_path) = &args.score {
        let validator = load_dictionary(dict_path)?;
        eprintln!("score: {:.4}", score(&text, &validator));
    }

    if args.outfile == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
    } else {
        fs::write(&args.outfile, text + "\n")
            .with_context(|| format!("writing {}", args.outfile))?;
    }
    Ok(())
}
