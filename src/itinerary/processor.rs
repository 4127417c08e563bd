//! Line driver for itinerary processing
//!
//! Reads the input line by line, normalizes vertical whitespace, collapses
//! runs of blank lines and pushes every other line through
//! [`find_matches`] and [`assemble`]. The result is a single string of
//! newline-terminated lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use itinerary::itinerary::processor::process_file;
//! use itinerary::itinerary::config::load_defaults;
//!
//! let config = load_defaults()?;
//! let text = process_file("input.txt", "airport-lookup.csv", &config)?;
//! ```

use super::assembler::{assemble, Resolve};
use super::config::{ItineraryConfig, OutputConfig};
use super::matcher::find_matches;
use super::resolver::{CodeIndex, CodeTable};
use super::table::TableError;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    FileNotFound(String),
    Io(String),
    Table(TableError),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "Input not found: {}", path),
            ProcessingError::Io(msg) => {
                write!(f, "Error reading from input file: {}", msg)
            }
            ProcessingError::Table(e) => write!(f, "{}", e),
        }
    }
}

impl From<TableError> for ProcessingError {
    fn from(e: TableError) -> Self {
        ProcessingError::Table(e)
    }
}

/// Turn vertical tab, form feed and carriage return into `\n`, then trim.
pub fn normalize_line(raw: &str) -> String {
    raw.replace(['\x0B', '\x0C', '\r'], "\n").trim().to_string()
}

/// Drive already-split lines through the pipeline.
///
/// Stops at the first read error; nothing accumulated so far is returned.
pub fn process_lines<I, R>(
    lines: I,
    resolver: &R,
    output: &OutputConfig,
) -> Result<String, ProcessingError>
where
    I: IntoIterator<Item = io::Result<String>>,
    R: Resolve + ?Sized,
{
    let mut units: Vec<String> = Vec::new();
    let mut last_line_was_blank = false;

    for raw in lines {
        let raw = raw.map_err(|e| ProcessingError::Io(e.to_string()))?;
        let line = normalize_line(&raw);

        if line.is_empty() {
            if !(output.collapse_blank_lines && last_line_was_blank) {
                units.push("\n".to_string());
            }
            last_line_was_blank = true;
        } else {
            last_line_was_blank = false;
            let matches = find_matches(&line);
            debug!(matches = matches.len(), "processing line");
            units.push(assemble(matches, &line, resolver));
        }
    }

    info!(lines = units.len(), "processed input");
    Ok(units.concat())
}

/// Process a line source with the default output settings.
pub fn process<B: BufRead, R: Resolve + ?Sized>(
    reader: B,
    resolver: &R,
) -> Result<String, ProcessingError> {
    process_lines(reader.lines(), resolver, &OutputConfig::default())
}

/// Process an input file against a CSV code table on disk.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    table_path: Q,
    config: &ItineraryConfig,
) -> Result<String, ProcessingError> {
    let input_path = input_path.as_ref();
    let input = File::open(input_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProcessingError::FileNotFound(input_path.display().to_string()),
        _ => ProcessingError::Io(e.to_string()),
    })?;

    let (table, columns) = CodeTable::open(table_path, &config.table)?;
    let index = CodeIndex::build(&table, &columns);

    process_lines(BufReader::new(input).lines(), &index, &config.output)
}
