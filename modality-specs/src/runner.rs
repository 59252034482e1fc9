//! Runs fixtures through an analysis engine and compares the results.

use alethic_modality::{AnalysisEngine, AnalysisResult, Axis};

use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::{FixtureCase, ModalityFixture};
use crate::formatter::{format_failure, format_summary};

/// One expectation that did not hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl Mismatch {
    fn new(field: impl Into<String>, expected: impl ToString, actual: impl ToString) -> Self {
        Self {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Passed,
    Failed(Vec<Mismatch>),
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: String,
    pub result: AnalysisResult,
    pub outcome: CaseOutcome,
}

/// Outcome of every case in one fixture, in file order.
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub title: Option<String>,
    pub cases: Vec<CaseReport>,
}

impl FixtureReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn case(&self, name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|c| c.name == name)
    }
}

/// Compare one analysis result against a case's expectations.
pub fn check_case(case: &FixtureCase, result: &AnalysisResult) -> CaseOutcome {
    let mut mismatches = Vec::new();

    if let Some(expected) = case.classification {
        if result.classification != expected {
            mismatches.push(Mismatch::new(
                "classification",
                expected,
                result.classification,
            ));
        }
    }

    if let Some(expected) = case.is_paragraph {
        if result.is_paragraph != expected {
            mismatches.push(Mismatch::new("is_paragraph", expected, result.is_paragraph));
        }
    }

    if let Some(expected) = case.sentences {
        if result.sentences.len() != expected {
            mismatches.push(Mismatch::new("sentences", expected, result.sentences.len()));
        }
    }

    let tolerance = case.tolerance();
    for axis in Axis::ALL {
        let Some(expected) = case.expected_score(axis) else {
            continue;
        };
        let actual = result.aggregate_scores.get(axis);
        if (actual - expected).abs() > tolerance {
            mismatches.push(Mismatch::new(
                axis.name(),
                format!("{expected} ± {tolerance}"),
                actual,
            ));
        }
    }

    if mismatches.is_empty() {
        CaseOutcome::Passed
    } else {
        CaseOutcome::Failed(mismatches)
    }
}

/// Analyze every case of `fixture` with `engine`, attaching sentence
/// analyses so failure reports can show modal indicators.
pub fn run_fixture(engine: &AnalysisEngine, fixture: &ModalityFixture) -> FixtureReport {
    let cases = fixture
        .cases
        .iter()
        .map(|case| {
            let result = engine.analyze_detailed(&case.text);
            let outcome = check_case(case, &result);
            CaseReport {
                name: case.name.clone(),
                result,
                outcome,
            }
        })
        .collect();

    FixtureReport {
        title: fixture.title.clone(),
        cases,
    }
}

/// Run every fixture, classify failures against `expected`, and tally.
///
/// Regressions are logged with their full failure report, expected failures
/// with their recorded reason, and each fixture with a summary line.
pub fn run_all(
    engine: &AnalysisEngine,
    fixtures: &[(String, ModalityFixture)],
    expected: &ExpectedFailures,
) -> HarnessResult {
    let mut harness = HarnessResult::new();

    for (fixture_name, fixture) in fixtures {
        let report = run_fixture(engine, fixture);
        let mut fixture_result = HarnessResult::new();

        for (case, case_report) in fixture.cases.iter().zip(&report.cases) {
            let state = expected.state(fixture_name, &case.name);
            let entry = expected.get_entry(fixture_name, &case.name);
            match &case_report.outcome {
                CaseOutcome::Passed => {
                    if state != FailureState::Regression {
                        log::info!(
                            "{fixture_name}: {} passes; its expected-failure entry can go",
                            case.name
                        );
                    }
                    fixture_result.record_pass(state);
                }
                CaseOutcome::Failed(mismatches) => {
                    let failure =
                        format_failure(fixture_name, case, &case_report.result, mismatches, entry);
                    if state == FailureState::Regression {
                        log::warn!("{failure}");
                    } else {
                        log::debug!("{failure}");
                    }
                    fixture_result.record_failure(state);
                }
            }
        }

        log::info!("{}", format_summary(fixture_name, &fixture_result).trim());
        harness.merge(&fixture_result);
    }

    harness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::parse_fixture;
    use alethic_modality::Label;

    fn fixture(content: &str) -> ModalityFixture {
        parse_fixture(content).unwrap()
    }

    #[test]
    fn test_passing_case() {
        let fixture = fixture(
            r#"
[[case]]
name = "sum"
text = "2 + 2 = 4"
classification = "Logically Necessary"
is_paragraph = false
sentences = 1
necessity = 95
possibility = 19
impossibility = 0
"#,
        );
        let report = run_fixture(&AnalysisEngine::new(), &fixture);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.case("sum").unwrap().result.classification, Label::LogicallyNecessary);
    }

    #[test]
    fn test_failing_case_lists_every_mismatch() {
        let fixture = fixture(
            r#"
[[case]]
name = "wrong"
text = "It might rain tomorrow."
classification = "Highly Possible"
sentences = 2
possibility = 80
"#,
        );
        let report = run_fixture(&AnalysisEngine::new(), &fixture);
        let CaseOutcome::Failed(mismatches) = &report.cases[0].outcome else {
            panic!("expected a failure");
        };
        let fields = mismatches.iter().map(|m| m.field.as_str()).collect::<Vec<_>>();
        assert_eq!(fields, vec!["classification", "sentences", "possibility"]);
        assert_eq!(mismatches[0].expected, "Highly Possible");
        assert_eq!(mismatches[0].actual, "Possible");
        assert_eq!(mismatches[2].actual, "60");
    }

    #[test]
    fn test_tolerance() {
        let fixture = fixture(
            r#"
[[case]]
name = "close"
text = "You must pay rent. I think so."
possibility = 70

[[case]]
name = "tight"
text = "You must pay rent. I think so."
possibility = 70
tolerance = 0.01
"#,
        );
        let report = run_fixture(&AnalysisEngine::new(), &fixture);
        assert!(report.case("close").unwrap().outcome.is_passed());
        assert!(!report.case("tight").unwrap().outcome.is_passed());
    }

    #[test]
    fn test_run_all_classifies_failures() {
        let fixtures = vec![(
            "a.toml".to_string(),
            fixture(
                r#"
[[case]]
name = "ok"
text = "2 + 2 = 4"
necessity = 95

[[case]]
name = "known-bad"
text = "2 + 2 = 4"
necessity = 0

[[case]]
name = "regressed"
text = "2 + 2 = 4"
impossibility = 95
"#,
            ),
        )];
        let expected: ExpectedFailures = toml::from_str(
            r#"
[[known]]
fixture = "a.toml"
case = "known-bad"
"#,
        )
        .unwrap();

        let harness = run_all(&AnalysisEngine::new(), &fixtures, &expected);
        assert_eq!(harness.total, 3);
        assert_eq!(harness.passed, 1);
        assert_eq!(harness.expected_failures, 1);
        assert_eq!(harness.regressions, 1);
        assert!(!harness.success());
    }

    #[test]
    fn test_run_all_totals_across_fixtures() {
        let fixtures = vec![
            (
                "a.toml".to_string(),
                fixture(
                    r#"
[[case]]
name = "sum"
text = "2 + 2 = 4"
necessity = 95

[[case]]
name = "fish"
text = "Fish cannot fly."
classification = "Neutral/Contingent"
"#,
                ),
            ),
            (
                "b.toml".to_string(),
                fixture(
                    r#"
[[case]]
name = "fish"
text = "Fish cannot fly."
classification = "Possible"

[[case]]
name = "rain"
text = "It might rain tomorrow."
classification = "Highly Possible"
"#,
                ),
            ),
        ];
        let expected: ExpectedFailures = toml::from_str(
            r#"
[[known]]
fixture = "a.toml"
case = "fish"
reason = "Negation is not modelled"

[[pending]]
fixture = "b.toml"
case = "fish"
"#,
        )
        .unwrap();

        let harness = run_all(&AnalysisEngine::new(), &fixtures, &expected);
        assert_eq!(
            harness,
            HarnessResult {
                total: 4,
                passed: 2,
                expected_failures: 1,
                regressions: 1,
                unexpected_passes: 1,
            }
        );
    }

    #[test]
    fn test_run_fixture_attaches_sentence_analysis() {
        let fixture = fixture(
            r#"
[[case]]
name = "conditional"
text = "If it rains, we will stay home."
"#,
        );
        let report = run_fixture(&AnalysisEngine::new(), &fixture);
        let result = &report.case("conditional").unwrap().result;
        let analysis = result.sentence_results[0].analysis.as_ref().unwrap();
        assert!(analysis.structure.is_conditional);
    }
}
