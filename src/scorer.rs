//! Per-sentence scoring.

use crate::config::Thresholds;
use crate::contingent::{CascadeHit, ContingentAnalyzer};
use crate::patterns::{PatternMatcher, RuleTables};
use crate::types::ModalityScore;

/// Produces one score triple per sentence.
///
/// Necessity takes precedence over impossibility; a sentence with neither is
/// handed to the [`ContingentAnalyzer`].
#[derive(Debug, Clone, Copy)]
pub struct SentenceScorer<'a> {
    matcher: PatternMatcher<'a>,
    contingent: ContingentAnalyzer<'a>,
    thresholds: &'a Thresholds,
}

impl<'a> SentenceScorer<'a> {
    pub fn new(rules: &'a RuleTables, thresholds: &'a Thresholds) -> Self {
        Self {
            matcher: PatternMatcher::new(rules, thresholds),
            contingent: ContingentAnalyzer::new(rules.keywords(), thresholds),
            thresholds,
        }
    }

    pub fn score(&self, sentence: &str) -> ModalityScore {
        self.score_with_trace(sentence).0
    }

    /// Score a sentence and report the contingent steps that fired. The
    /// trace is empty when a necessity or impossibility rule decided.
    pub fn score_with_trace(&self, sentence: &str) -> (ModalityScore, Vec<CascadeHit>) {
        let lower = sentence.to_lowercase();

        let necessity = self.matcher.match_necessity(&lower);
        let impossibility = self.matcher.match_impossibility(&lower);

        let (scores, trace) = match (necessity, impossibility) {
            (Some(rule), _) if rule.score > 0.0 => {
                log::debug!("{:?} rule {:?} fired", rule.kind, rule.pattern);
                let scores = ModalityScore {
                    necessity: rule.score,
                    possibility: self
                        .thresholds
                        .necessity_possibility_cap
                        .min(rule.score * self.thresholds.necessity_possibility_factor),
                    impossibility: 0.0,
                };
                (scores, Vec::new())
            }
            (_, Some(rule)) if rule.score > 0.0 => {
                log::debug!("{:?} rule {:?} fired", rule.kind, rule.pattern);
                let scores = ModalityScore {
                    necessity: 0.0,
                    possibility: 0.0,
                    impossibility: rule.score,
                };
                (scores, Vec::new())
            }
            _ => self.contingent.score_with_trace(&lower),
        };

        (scores.clamped(), trace)
    }
}
