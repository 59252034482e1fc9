//! Scoring for contingent sentences.
//!
//! A sentence that is neither logically necessary nor logically impossible is
//! scored by an ordered cascade over keyword categories. Each step that fires
//! overwrites `possibility`; the empirical step also forces `necessity` to 0.
//! A sentence matching both the possibility and empirical steps therefore
//! ends at the empirical value, not the possibility value.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::patterns::{find_keyword, KeywordTables};
use crate::types::ModalityScore;

/// One step of the contingent cascade, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadeStep {
    Epistemic,
    Deontic,
    Possibility,
    Empirical,
}

/// A cascade step that fired and the keyword that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeHit {
    pub step: CascadeStep,
    pub keyword: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ContingentAnalyzer<'a> {
    keywords: &'a KeywordTables,
    thresholds: &'a Thresholds,
}

impl<'a> ContingentAnalyzer<'a> {
    pub fn new(keywords: &'a KeywordTables, thresholds: &'a Thresholds) -> Self {
        Self {
            keywords,
            thresholds,
        }
    }

    /// Score a lower-cased contingent sentence.
    pub fn score_contingent(&self, sentence_lower: &str) -> ModalityScore {
        self.score_with_trace(sentence_lower).0
    }

    /// Score a lower-cased contingent sentence and report every step that fired.
    pub fn score_with_trace(&self, sentence_lower: &str) -> (ModalityScore, Vec<CascadeHit>) {
        let mut scores = ModalityScore::ZERO;
        let mut hits = Vec::new();

        let steps: [(CascadeStep, &[String], f64); 4] = [
            (
                CascadeStep::Epistemic,
                &self.keywords.epistemic,
                self.thresholds.epistemic_possibility,
            ),
            (
                CascadeStep::Deontic,
                &self.keywords.deontic,
                self.thresholds.deontic_possibility,
            ),
            (
                CascadeStep::Possibility,
                &self.keywords.possibility,
                self.thresholds.modal_possibility,
            ),
            (
                CascadeStep::Empirical,
                &self.keywords.empirical,
                self.thresholds.empirical_possibility,
            ),
        ];

        for (step, keywords, value) in steps {
            let Some(keyword) = find_keyword(keywords, sentence_lower) else {
                continue;
            };

            scores.possibility = value;
            if step == CascadeStep::Empirical {
                scores.necessity = 0.0;
            }

            log::debug!("contingent {step:?} step fired on {keyword:?}: possibility = {value}");
            hits.push(CascadeHit {
                step,
                keyword: keyword.to_string(),
            });
        }

        (scores, hits)
    }
}
