//! Loading the airport code table from CSV
//!
//! The first record is a header. The three columns the resolver needs are
//! found by name (see [`TableConfig`]), which yields the [`Columns`] handed to
//! the rest of the pipeline. Every data row must carry a non-empty value in
//! each of those three columns; anything else makes the table malformed.

use super::config::TableConfig;
use super::resolver::{CodeTable, Columns};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Errors raised while loading a code table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    NotFound(String),
    Io(String),
    MissingColumn(String),
    Malformed { line: usize, reason: String },
}

impl std::error::Error for TableError {}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NotFound(path) => write!(f, "Airport lookup not found: {}", path),
            TableError::Io(msg) => write!(f, "IO error: {}", msg),
            TableError::MissingColumn(name) => {
                write!(f, "Airport lookup malformed: missing column '{}'", name)
            }
            TableError::Malformed { line, reason } => {
                write!(f, "Airport lookup malformed: line {}: {}", line, reason)
            }
        }
    }
}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        TableError::Io(e.to_string())
    }
}

fn find_column(header: &[String], name: &str) -> Result<usize, TableError> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| TableError::MissingColumn(name.to_string()))
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            return TableError::Io(e.to_string());
        }
        let line = e.position().map_or(0, |p| p.line() as usize);
        TableError::Malformed {
            line,
            reason: e.to_string(),
        }
    }
}

impl CodeTable {
    /// Read a table from CSV text, locating columns by header name.
    ///
    /// Quoted fields may span lines; reported line numbers are those on which
    /// the offending record starts.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        config: &TableConfig,
    ) -> Result<(CodeTable, Columns), TableError> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| TableError::Malformed {
                line: 0,
                reason: format!("delimiter {:?} is not a single ASCII character", config.delimiter),
            })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if header.is_empty() {
            return Err(TableError::Malformed {
                line: 1,
                reason: "empty table".to_string(),
            });
        }
        let columns = Columns::new(
            find_column(&header, &config.three_letter_column)?,
            find_column(&header, &config.four_letter_column)?,
            find_column(&header, &config.name_column)?,
        );
        debug!(?columns, "located code table columns");

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line_no = record.position().map_or(0, |p| p.line() as usize);
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            for column in [columns.three_letter, columns.four_letter, columns.name] {
                match record.get(column) {
                    Some(value) if !value.trim().is_empty() => {}
                    Some(_) => {
                        warn!(line = line_no, column = %header[column], "blank value in code table");
                        return Err(TableError::Malformed {
                            line: line_no,
                            reason: format!("blank value in column '{}'", header[column]),
                        });
                    }
                    None => {
                        return Err(TableError::Malformed {
                            line: line_no,
                            reason: format!(
                                "expected at least {} fields, found {}",
                                column + 1,
                                record.len()
                            ),
                        })
                    }
                }
            }
            rows.push(record.iter().map(String::from).collect());
        }

        debug!(rows = rows.len(), "loaded code table");
        Ok((CodeTable::new(rows), columns))
    }

    /// Open and read a CSV code table from disk.
    pub fn open<P: AsRef<Path>>(
        path: P,
        config: &TableConfig,
    ) -> Result<(CodeTable, Columns), TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TableError::NotFound(path.display().to_string()),
            _ => TableError::Io(e.to_string()),
        })?;
        Self::from_csv_reader(BufReader::new(file), config)
    }
}
