//! Airport code resolution
//!
//! The code table is a plain list of rows. Which field holds the three-letter
//! code, the four-letter code and the display name is fixed for the whole run
//! by [`Columns`].
//!
//! [`resolve`] is the reference lookup: one linear scan, first row wins,
//! case-sensitive comparison on the code with its `#` prefix stripped.
//! [`CodeIndex`] answers the same questions from hash maps built once.

use std::collections::HashMap;

/// Field positions within a code table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub three_letter: usize,
    pub four_letter: usize,
    pub name: usize,
}

impl Columns {
    pub fn new(three_letter: usize, four_letter: usize, name: usize) -> Self {
        Self {
            three_letter,
            four_letter,
            name,
        }
    }

    fn code_column(&self, bare: &str) -> Option<usize> {
        match bare.len() {
            3 => Some(self.three_letter),
            4 => Some(self.four_letter),
            _ => None,
        }
    }
}

/// Rows of the airport reference table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    rows: Vec<Vec<String>>,
}

impl CodeTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn bare_code(code: &str) -> &str {
    code.trim_start_matches('#')
}

/// Look `code` (`#AAA` or `##AAAA`) up in `table`.
///
/// Returns the display name of the first matching row, or `code` itself when
/// nothing matches.
pub fn resolve(code: &str, table: &CodeTable, columns: &Columns) -> String {
    let bare = bare_code(code);
    let Some(column) = columns.code_column(bare) else {
        return code.to_string();
    };

    table
        .rows()
        .iter()
        .find(|row| row.get(column).map(String::as_str) == Some(bare))
        .and_then(|row| row.get(columns.name))
        .cloned()
        .unwrap_or_else(|| code.to_string())
}

/// Hash-map view over a [`CodeTable`], built once per run
#[derive(Debug, Clone, Default)]
pub struct CodeIndex {
    // `None` marks a first matching row that has no name field
    three_letter: HashMap<String, Option<String>>,
    four_letter: HashMap<String, Option<String>>,
}

impl CodeIndex {
    pub fn build(table: &CodeTable, columns: &Columns) -> Self {
        let mut index = Self::default();
        for row in table.rows() {
            let name = row.get(columns.name);
            if let Some(code) = row.get(columns.three_letter) {
                index
                    .three_letter
                    .entry(code.clone())
                    .or_insert_with(|| name.cloned());
            }
            if let Some(code) = row.get(columns.four_letter) {
                index
                    .four_letter
                    .entry(code.clone())
                    .or_insert_with(|| name.cloned());
            }
        }
        index
    }

    /// Same contract as [`resolve`].
    pub fn resolve(&self, code: &str) -> String {
        let bare = bare_code(code);
        let names = match bare.len() {
            3 => &self.three_letter,
            4 => &self.four_letter,
            _ => return code.to_string(),
        };
        names
            .get(bare)
            .and_then(Option::clone)
            .unwrap_or_else(|| code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn sample_table() -> (CodeTable, Columns) {
        // name, iso_country, icao_code, iata_code
        let table = CodeTable::new(vec![
            row(&["John F. Kennedy Intl", "US", "KJFK", "JFK"]),
            row(&["Los Angeles Intl", "US", "KLAX", "LAX"]),
            row(&["London Heathrow", "GB", "EGLL", "LHR"]),
            row(&["Duplicate JFK", "US", "KJFX", "JFK"]),
        ]);
        (table, Columns::new(3, 2, 0))
    }

    #[test]
    fn test_resolve_three_letter() {
        let (table, columns) = sample_table();
        assert_eq!(resolve("#JFK", &table, &columns), "John F. Kennedy Intl");
        assert_eq!(resolve("#LHR", &table, &columns), "London Heathrow");
    }

    #[test]
    fn test_resolve_four_letter() {
        let (table, columns) = sample_table();
        assert_eq!(resolve("##EGLL", &table, &columns), "London Heathrow");
        assert_eq!(resolve("##KLAX", &table, &columns), "Los Angeles Intl");
    }

    #[test]
    fn test_first_row_wins() {
        let (table, columns) = sample_table();
        assert_eq!(resolve("#JFK", &table, &columns), "John F. Kennedy Intl");
        assert_eq!(CodeIndex::build(&table, &columns).resolve("#JFK"), "John F. Kennedy Intl");
    }

    #[test]
    fn test_miss_returns_original_text() {
        let (table, columns) = sample_table();
        assert_eq!(resolve("#ZZZ", &table, &columns), "#ZZZ");
        assert_eq!(resolve("##ZZZZ", &table, &columns), "##ZZZZ");
        // a three-letter code is never looked up in the four-letter column
        assert_eq!(resolve("#EGL", &table, &columns), "#EGL");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = CodeTable::new(vec![row(&["Lowercase", "xx", "abcd", "abc"])]);
        let columns = Columns::new(3, 2, 0);
        assert_eq!(resolve("#ABC", &table, &columns), "#ABC");
        assert_eq!(resolve("#abc", &table, &columns), "Lowercase");
    }

    #[test]
    fn test_short_rows_never_match() {
        let table = CodeTable::new(vec![row(&["Short"]), row(&["Ok", "", "KOKK", "OKK"])]);
        let columns = Columns::new(3, 2, 0);
        assert_eq!(resolve("#OKK", &table, &columns), "Ok");
        assert_eq!(CodeIndex::build(&table, &columns).resolve("#OKK"), "Ok");

        // the name column sits past the end of the first matching row
        let columns = Columns::new(0, 1, 5);
        let table = CodeTable::new(vec![
            row(&["ABC", "KABC"]),
            row(&["ABC", "KABC", "", "", "", "Later"]),
        ]);
        assert_eq!(resolve("#ABC", &table, &columns), "#ABC");
        assert_eq!(CodeIndex::build(&table, &columns).resolve("#ABC"), "#ABC");
    }

    #[test]
    fn test_index_agrees_with_scan() {
        let (table, columns) = sample_table();
        let index = CodeIndex::build(&table, &columns);
        for code in ["#JFK", "#LAX", "#LHR", "#ZZZ", "##KJFK", "##EGLL", "##KJFX", "##NOPE", "#EGL"] {
            assert_eq!(index.resolve(code), resolve(code, &table, &columns), "{code}");
        }
    }
}
