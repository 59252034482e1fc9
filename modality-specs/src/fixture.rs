//! Fixture file format.
//!
//! A fixture is a TOML document with an optional title and a list of cases:
//!
//! ```toml
//! title = "Arithmetic"
//!
//! [[case]]
//! name = "simple-sum"
//! text = "2 + 2 = 4"
//! classification = "Logically Necessary"
//! necessity = 95
//! ```
//!
//! Every expectation is optional; a case with none only checks that the text
//! analyzes.

use alethic_modality::{Axis, Label};
use serde::Deserialize;
use std::collections::HashSet;

use crate::errors::{SpecError, SpecResult};

/// Score tolerance used when a case does not set one.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// A parsed fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct ModalityFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "case")]
    pub cases: Vec<FixtureCase>,
}

/// One input text and what analyzing it should produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureCase {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub classification: Option<Label>,
    #[serde(default)]
    pub is_paragraph: Option<bool>,
    /// Expected sentence count.
    #[serde(default)]
    pub sentences: Option<usize>,
    #[serde(default)]
    pub necessity: Option<f64>,
    #[serde(default)]
    pub possibility: Option<f64>,
    #[serde(default)]
    pub impossibility: Option<f64>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl FixtureCase {
    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    /// Expected aggregate score on `axis`, if the case sets one.
    pub fn expected_score(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Necessity => self.necessity,
            Axis::Possibility => self.possibility,
            Axis::Impossibility => self.impossibility,
        }
    }
}

impl ModalityFixture {
    pub fn case(&self, name: &str) -> Option<&FixtureCase> {
        self.cases.iter().find(|c| c.name == name)
    }
}

/// Parse and validate fixture content.
pub fn parse_fixture(content: &str) -> SpecResult<ModalityFixture> {
    let fixture: ModalityFixture = toml::from_str(content).map_err(|e| SpecError::Parse {
        line: e
            .span()
            .map_or(0, |span| line_of(content, span.start)),
        message: e.message().to_string(),
    })?;

    let mut seen = HashSet::new();
    for case in &fixture.cases {
        let line = content
            .find(&format!("\"{}\"", case.name))
            .map_or(0, |offset| line_of(content, offset));
        if case.name.trim().is_empty() {
            return Err(SpecError::Parse {
                line,
                message: "case name must not be empty".to_string(),
            });
        }
        if !seen.insert(case.name.as_str()) {
            return Err(SpecError::Parse {
                line,
                message: format!("duplicate case name {:?}", case.name),
            });
        }
        if let Some(tolerance) = case.tolerance {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(SpecError::Parse {
                    line,
                    message: format!("case {:?}: tolerance must be >= 0", case.name),
                });
            }
        }
    }

    Ok(fixture)
}

/// 1-based line containing byte `offset`.
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let fixture = parse_fixture(
            r#"
[[case]]
name = "bare"
text = "Hello."
"#,
        )
        .unwrap();
        assert!(fixture.title.is_none());
        assert_eq!(fixture.cases.len(), 1);
        assert_eq!(fixture.cases[0].tolerance(), DEFAULT_TOLERANCE);
        assert!(fixture.cases[0].classification.is_none());
    }

    #[test]
    fn test_parse_expectations() {
        let fixture = parse_fixture(
            r#"
title = "Test"

[[case]]
name = "sum"
text = "2 + 2 = 4"
classification = "Logically Necessary"
is_paragraph = false
sentences = 1
necessity = 95
possibility = 19.0
tolerance = 0.01
"#,
        )
        .unwrap();

        let case = fixture.case("sum").unwrap();
        assert_eq!(fixture.title.as_deref(), Some("Test"));
        assert_eq!(case.classification, Some(Label::LogicallyNecessary));
        assert_eq!(case.is_paragraph, Some(false));
        assert_eq!(case.sentences, Some(1));
        assert_eq!(case.expected_score(Axis::Necessity), Some(95.0));
        assert_eq!(case.expected_score(Axis::Impossibility), None);
        assert_eq!(case.tolerance(), 0.01);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = parse_fixture(
            r#"
[[case]]
name = "bad"
text = "x"
classification = "Somewhat Necessary"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_fixture(
            r#"
[[case]]
name = "bad"
text = "x"
necesity = 90
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = parse_fixture(
            r#"
[[case]]
name = "twice"
text = "a"

[[case]]
name = "twice"
text = "b"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate case name"), "{err}");
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = parse_fixture(
            r#"
[[case]]
name = "loose"
text = "a"
tolerance = -1.0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("tolerance"), "{err}");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_fixture("title = \"ok\"\n\n[[case]\nname = \"x\"\n").unwrap_err();
        match err {
            SpecError::Parse { line, .. } => assert!((3..=4).contains(&line), "line {line}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
