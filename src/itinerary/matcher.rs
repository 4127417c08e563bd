//! Token detection for itinerary lines
//!
//! Three independent detectors run over the same line:
//!
//! - `#AAA`   three-letter (IATA-style) airport code
//! - `##AAAA` four-letter (ICAO-style) airport code
//! - `D(2024-03-01T10:00+02:00)` / `T07(2024-03-01T10:00Z)` date markers
//!
//! The three-letter pattern is not anchored, so every `##AAAA` token also
//! yields a `#AAA` match one byte later. Nothing is suppressed here: the
//! assembler decides what happens to overlapping matches.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static THREE_LETTER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[A-Z]{3}").unwrap());

static FOUR_LETTER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"##[A-Z]{4}").unwrap());

/// Date marker: flag, optional two-digit qualifier, parenthesized timestamp with zone suffix
pub(crate) static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<flag>[DT])(?P<qualifier>\d{2})?\((?P<stamp>\d{4}-\d{2}-\d{2}T\d{2}:\d{2})(?P<zone>Z|[+-]\d{2}:\d{2})\)",
    )
    .unwrap()
});

/// The shape a match was detected with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    ThreeLetterCode,
    FourLetterCode,
    Date,
}

impl MatchKind {
    pub fn is_code(self) -> bool {
        matches!(self, MatchKind::ThreeLetterCode | MatchKind::FourLetterCode)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::ThreeLetterCode => write!(f, "<three-letter-code>"),
            MatchKind::FourLetterCode => write!(f, "<four-letter-code>"),
            MatchKind::Date => write!(f, "<date>"),
        }
    }
}

/// A token occurrence within a single (trimmed) line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the first character of `text`
    pub offset: usize,
    /// The literal matched substring
    pub text: String,
    pub kind: MatchKind,
}

impl Match {
    pub fn new(offset: usize, text: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            offset,
            text: text.into(),
            kind,
        }
    }
}

fn collect(regex: &Regex, line: &str, kind: MatchKind, out: &mut Vec<Match>) {
    out.extend(
        regex
            .find_iter(line)
            .map(|m| Match::new(m.start(), m.as_str(), kind)),
    );
}

/// Whether `text` is, in its entirety, a date marker.
pub fn is_date_marker(text: &str) -> bool {
    DATE_REGEX
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Find every code and date token in `line`.
///
/// Results are grouped by detector (three-letter, four-letter, date) and each
/// group is in left-to-right order. No sorting or deduplication happens here.
pub fn find_matches(line: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    collect(&THREE_LETTER_REGEX, line, MatchKind::ThreeLetterCode, &mut matches);
    collect(&FOUR_LETTER_REGEX, line, MatchKind::FourLetterCode, &mut matches);
    collect(&DATE_REGEX, line, MatchKind::Date, &mut matches);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_no_tokens() {
        assert!(find_matches("Nothing to see here.").is_empty());
        assert!(find_matches("").is_empty());
    }

    #[test]
    fn test_three_letter_code() {
        let matches = find_matches("Flight from #JFK to #LAX");
        assert_eq!(
            matches,
            vec![
                Match::new(12, "#JFK", MatchKind::ThreeLetterCode),
                Match::new(20, "#LAX", MatchKind::ThreeLetterCode),
            ]
        );
    }

    #[test]
    fn test_four_letter_code_also_yields_embedded_three_letter_match() {
        let matches = find_matches("Arrive ##EGLL");
        assert_eq!(
            matches,
            vec![
                Match::new(8, "#EGL", MatchKind::ThreeLetterCode),
                Match::new(7, "##EGLL", MatchKind::FourLetterCode),
            ]
        );
    }

    #[rstest]
    #[case("#jfk")]
    #[case("#JF")]
    #[case("# JFK")]
    #[case("JFK")]
    fn test_not_a_code(#[case] text: &str) {
        assert!(find_matches(text).is_empty(), "{text:?} should not match");
    }

    #[rstest]
    #[case("D(2024-03-01T10:00Z)")]
    #[case("T(2024-03-01T10:00+02:00)")]
    #[case("T12(2024-03-01T10:00-05:30)")]
    #[case("D07(1999-12-31T23:59Z)")]
    fn test_date_marker(#[case] token: &str) {
        let line = format!("at {token}.");
        assert_eq!(find_matches(&line), vec![Match::new(3, token, MatchKind::Date)]);
    }

    #[rstest]
    #[case("D(2024-03-01)")]
    #[case("D(2024-03-01T10:00)")]
    #[case("X(2024-03-01T10:00Z)")]
    #[case("D1(2024-03-01T10:00Z)")]
    #[case("D(2024-03-01T10:00:00Z)")]
    #[case("D(2024-03-01T10:00+0200)")]
    fn test_not_a_date_marker(#[case] text: &str) {
        assert!(find_matches(text).is_empty(), "{text:?} should not match");
    }

    #[test]
    fn test_detector_order_is_codes_then_dates() {
        let matches = find_matches("D(2024-03-01T10:00Z) ##KJFK #LAX");
        let kinds: Vec<MatchKind> = matches.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MatchKind::ThreeLetterCode,
                MatchKind::ThreeLetterCode,
                MatchKind::FourLetterCode,
                MatchKind::Date,
            ]
        );
        assert_eq!(matches[0].text, "#KJF");
        assert_eq!(matches[1].text, "#LAX");
    }

    #[test]
    fn test_offsets_are_byte_offsets() {
        let matches = find_matches("Zürich #ZRH");
        assert_eq!(matches, vec![Match::new(8, "#ZRH", MatchKind::ThreeLetterCode)]);
    }

    #[test]
    fn test_is_date_marker() {
        assert!(is_date_marker("T07(2024-03-01T10:00Z)"));
        assert!(!is_date_marker("T07(2024-03-01T10:00Z) "));
        assert!(!is_date_marker("xD(2024-03-01T10:00Z)"));
    }

    #[test]
    fn test_match_kind_display() {
        assert_eq!(MatchKind::ThreeLetterCode.to_string(), "<three-letter-code>");
        assert_eq!(MatchKind::FourLetterCode.to_string(), "<four-letter-code>");
        assert_eq!(MatchKind::Date.to_string(), "<date>");
    }
}
