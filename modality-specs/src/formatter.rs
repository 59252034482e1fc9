//! Failure and summary reports.

use alethic_modality::{AnalysisDisplay, AnalysisResult, Axis, Label};
use std::fmt::Write;

use crate::failures::{FailureEntry, HarnessResult};
use crate::fixture::FixtureCase;
use crate::runner::Mismatch;

/// Render a failed case with the engine's view of the text and every
/// mismatched expectation.
///
/// Sentences carrying a detailed analysis also list their modal indicators.
/// `entry` is the expected-failure entry for the case, if any.
pub fn format_failure(
    fixture_name: &str,
    case: &FixtureCase,
    result: &AnalysisResult,
    mismatches: &[Mismatch],
    entry: Option<&FailureEntry>,
) -> String {
    let mut output = String::new();

    writeln!(output, "\nFAIL: {}: {}", fixture_name, case.name).unwrap();
    if let Some(entry) = entry {
        writeln!(
            output,
            "  expected failure: {}",
            entry.reason.as_deref().unwrap_or("no reason given")
        )
        .unwrap();
    }
    writeln!(output).unwrap();

    for line in AnalysisDisplay::new(result).to_string().lines() {
        writeln!(output, "  {}", line).unwrap();
    }
    writeln!(output).unwrap();

    let mut wrote_indicators = false;
    for sentence in &result.sentence_results {
        let Some(analysis) = &sentence.analysis else {
            continue;
        };
        if analysis.indicators.is_empty() {
            continue;
        }
        let groups = Axis::ALL
            .into_iter()
            .filter(|axis| !analysis.indicators.get(*axis).is_empty())
            .map(|axis| format!("{}: {}", axis, analysis.indicators.get(axis).join(", ")))
            .collect::<Vec<_>>();
        writeln!(output, "    {} \u{2192} {}", sentence.sentence, groups.join("; ")).unwrap();
        wrote_indicators = true;
    }
    if wrote_indicators {
        writeln!(output).unwrap();
    }

    for mismatch in mismatches {
        writeln!(
            output,
            "    \u{2717} {}: expected `{}`, found `{}`",
            mismatch.field, mismatch.expected, mismatch.actual
        )
        .unwrap();
    }

    if let Some(hint) = generate_hint(case, result, mismatches) {
        writeln!(output).unwrap();
        writeln!(output, "  hint: {}", hint).unwrap();
    }

    output
}

/// One-fixture status line plus counts.
pub fn format_summary(fixture_name: &str, harness: &HarnessResult) -> String {
    let mut output = String::new();

    let status = if harness.success() { "PASS" } else { "FAIL" };
    let failed = harness.total - harness.passed;

    writeln!(output, "\n{}: {}", status, fixture_name).unwrap();
    writeln!(
        output,
        "  {} passed, {} failed ({} expected, {} regressions)",
        harness.passed, failed, harness.expected_failures, harness.regressions
    )
    .unwrap();
    if harness.unexpected_passes > 0 {
        writeln!(
            output,
            "  {} expected failures now pass",
            harness.unexpected_passes
        )
        .unwrap();
    }

    output
}

fn generate_hint(
    case: &FixtureCase,
    result: &AnalysisResult,
    mismatches: &[Mismatch],
) -> Option<String> {
    for mismatch in mismatches {
        if mismatch.field == "sentences" {
            return Some(
                "sentences break only at . ! or ? followed by whitespace".to_string(),
            );
        }
    }

    let expected = case.classification?;
    if result.classification == expected {
        return None;
    }

    if result.aggregate_scores.max_value() == 0.0 {
        return Some("no rule or keyword fired for this text".to_string());
    }
    if result.is_paragraph && expected.axis() == result.classification.axis() {
        return Some(
            "same axis, different tier: paragraph scores are length-weighted and adjusted by the sentence distribution"
                .to_string(),
        );
    }
    let negated = result
        .sentence_results
        .iter()
        .filter_map(|s| s.analysis.as_ref())
        .any(|a| a.structure.is_negated);
    if negated && matches!(result.classification.axis(), Some(Axis::Necessity | Axis::Possibility))
    {
        return Some(format!(
            "the text is negated, but negation does not change scores; {} keywords still count",
            result.aggregate_scores.leading_axis()
        ));
    }
    if expected == Label::NeutralContingent {
        return Some(format!(
            "{} scored above the threshold; check which rule fired",
            result.aggregate_scores.leading_axis()
        ));
    }

    None
}
