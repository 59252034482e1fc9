//! Human-readable summaries of analysis results.

use crate::aggregate::Distribution;
use crate::classify::Classifier;
use crate::types::{Label, ModalityScore, SentenceResult};

/// Round to the nearest integer, ties to even.
pub(crate) fn round_percent(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationGenerator {
    classifier: Classifier,
}

impl ExplanationGenerator {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Explanation for input that produced no sentences.
    pub fn empty(&self, label: Label) -> String {
        format!("No sentences to analyze. Classification: {label}")
    }

    /// Explanation for a single-sentence input.
    pub fn single(&self, label: Label) -> String {
        format!("Single sentence analysis. Classification: {label}")
    }

    /// Explanation attached to each sentence of a paragraph.
    pub fn sentence(&self, label: Label) -> String {
        format!("Sentence classification: {label}")
    }

    /// Summary of a paragraph: sentence count, dominant-modality breakdown,
    /// and the aggregate label with its leading axis.
    pub fn paragraph(
        &self,
        results: &[SentenceResult],
        aggregate: &ModalityScore,
        label: Label,
    ) -> String {
        let total = results.len();
        let distribution = Distribution::tally(results, &self.classifier);

        let mut explanation = format!(
            "Analyzed {total} sentence{}. ",
            if total > 1 { "s" } else { "" }
        );

        let breakdown = distribution
            .entries()
            .into_iter()
            .map(|(name, count)| {
                let percent = round_percent(count as f64 / total as f64 * 100.0);
                format!("{count} {name} ({percent}%)")
            })
            .collect::<Vec<_>>();
        if !breakdown.is_empty() {
            explanation.push_str(&format!("Distribution: {}. ", breakdown.join(", ")));
        }

        let leading = aggregate.leading_axis();
        explanation.push_str(&format!(
            "Overall classification: \"{label}\" based on weighted analysis with {leading} as the dominant modality ({}%).",
            round_percent(aggregate.get(leading))
        ));

        explanation
    }
}
