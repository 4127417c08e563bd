//! Ordered substitution of matches into a line
//!
//! Matches are sorted by offset (stable, so detector order breaks ties) and
//! applied one at a time. Each match replaces the *first remaining
//! occurrence* of its literal text in the current line state, not the bytes
//! at its offset. Two matches with the same text therefore consume two
//! occurrences in order, and a match whose text has already been rewritten
//! away (e.g. the `#EGL` inside `##EGLL`) replaces nothing.

use super::dates::{self, DateParseError};
use super::matcher::Match;
use super::resolver::{resolve, CodeIndex, CodeTable, Columns};
use tracing::debug;

/// Turns matched tokens into replacement text
pub trait Resolve {
    /// Display name for a `#AAA` / `##AAAA` code, or the code itself.
    fn resolve_code(&self, code: &str) -> String;

    /// Normalized form of a date marker.
    fn normalize_date(&self, token: &str) -> Result<String, DateParseError> {
        dates::normalize(token)
    }
}

impl Resolve for CodeIndex {
    fn resolve_code(&self, code: &str) -> String {
        self.resolve(code)
    }
}

/// Linear-scan resolver straight over a borrowed table
#[derive(Debug, Clone, Copy)]
pub struct TableResolver<'a> {
    pub table: &'a CodeTable,
    pub columns: Columns,
}

impl<'a> TableResolver<'a> {
    pub fn new(table: &'a CodeTable, columns: Columns) -> Self {
        Self { table, columns }
    }
}

impl Resolve for TableResolver<'_> {
    fn resolve_code(&self, code: &str) -> String {
        resolve(code, self.table, &self.columns)
    }
}

fn replacement_for<R: Resolve + ?Sized>(m: &Match, resolver: &R) -> String {
    if m.kind.is_code() {
        let name = resolver.resolve_code(&m.text);
        if name == m.text {
            debug!(kind = %m.kind, code = %m.text, "no airport for code, keeping original");
        }
        return name;
    }
    resolver.normalize_date(&m.text).unwrap_or_else(|err| {
        debug!(kind = %m.kind, %err, "keeping original date marker");
        m.text.clone()
    })
}

/// Apply `matches` to `line` and return the rewritten line with a trailing `\n`.
pub fn assemble<R: Resolve + ?Sized>(mut matches: Vec<Match>, line: &str, resolver: &R) -> String {
    matches.sort_by_key(|m| m.offset);

    let mut line = line.to_string();
    for m in &matches {
        let replacement = replacement_for(m, resolver);
        line = line.replacen(m.text.as_str(), &replacement, 1);
    }
    line.push('\n');
    line
}
