//! Core value types for modality scoring.
//!
//! Every value here is created fresh for a single `analyze` call and owned by
//! the caller. The three axes are scored independently; they are not a
//! probability distribution and need not sum to 100.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::SentenceAnalysis;

/// Lower bound of every axis score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every axis score.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to the nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.2}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.2}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// One of the three alethic axes.
///
/// `Axis::ALL` is the stable enumeration order used whenever every axis is
/// visited (weighted sums, consensus boosts, explanation breakdowns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Necessity,
    Possibility,
    Impossibility,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Necessity, Axis::Possibility, Axis::Impossibility];

    /// Order in which ties at the maximum are broken when picking a
    /// dominant axis or a label.
    pub const PRIORITY: [Axis; 3] = [Axis::Necessity, Axis::Impossibility, Axis::Possibility];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Necessity => "necessity",
            Axis::Possibility => "possibility",
            Axis::Impossibility => "impossibility",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Independent scores on the three axes, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModalityScore {
    pub necessity: f64,
    pub possibility: f64,
    pub impossibility: f64,
}

impl ModalityScore {
    pub const ZERO: ModalityScore = ModalityScore {
        necessity: 0.0,
        possibility: 0.0,
        impossibility: 0.0,
    };

    /// Create a score with every axis clamped to `[0, 100]`.
    pub fn new(necessity: f64, possibility: f64, impossibility: f64) -> Self {
        Self {
            necessity,
            possibility,
            impossibility,
        }
        .clamped()
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Necessity => self.necessity,
            Axis::Possibility => self.possibility,
            Axis::Impossibility => self.impossibility,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::Necessity => &mut self.necessity,
            Axis::Possibility => &mut self.possibility,
            Axis::Impossibility => &mut self.impossibility,
        }
    }

    /// Largest of the three axis values.
    pub fn max_value(&self) -> f64 {
        self.necessity.max(self.possibility).max(self.impossibility)
    }

    /// First axis holding the maximum, visiting necessity, possibility,
    /// impossibility in that order.
    pub fn leading_axis(&self) -> Axis {
        let mut leading = Axis::Necessity;
        for axis in Axis::ALL {
            if self.get(axis) > self.get(leading) {
                leading = axis;
            }
        }
        leading
    }

    /// Return a copy with every axis clamped to `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            necessity: clamp_score(self.necessity, SCORE_MIN, SCORE_MAX),
            possibility: clamp_score(self.possibility, SCORE_MIN, SCORE_MAX),
            impossibility: clamp_score(self.impossibility, SCORE_MIN, SCORE_MAX),
        }
    }
}

/// Discrete classification of a score triple.
///
/// Always derived from a [`ModalityScore`] by the classifier; serialized as
/// its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Logically Necessary")]
    LogicallyNecessary,
    #[serde(rename = "Strongly Necessary")]
    StronglyNecessary,
    #[serde(rename = "Necessary")]
    Necessary,
    #[serde(rename = "Weakly Necessary")]
    WeaklyNecessary,
    #[serde(rename = "Logically Impossible")]
    LogicallyImpossible,
    #[serde(rename = "Strongly Impossible")]
    StronglyImpossible,
    #[serde(rename = "Impossible")]
    Impossible,
    #[serde(rename = "Weakly Impossible")]
    WeaklyImpossible,
    #[serde(rename = "Highly Possible")]
    HighlyPossible,
    #[serde(rename = "Very Possible")]
    VeryPossible,
    #[serde(rename = "Possible")]
    Possible,
    #[serde(rename = "Weakly Possible")]
    WeaklyPossible,
    #[serde(rename = "Neutral/Contingent")]
    NeutralContingent,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::LogicallyNecessary => "Logically Necessary",
            Label::StronglyNecessary => "Strongly Necessary",
            Label::Necessary => "Necessary",
            Label::WeaklyNecessary => "Weakly Necessary",
            Label::LogicallyImpossible => "Logically Impossible",
            Label::StronglyImpossible => "Strongly Impossible",
            Label::Impossible => "Impossible",
            Label::WeaklyImpossible => "Weakly Impossible",
            Label::HighlyPossible => "Highly Possible",
            Label::VeryPossible => "Very Possible",
            Label::Possible => "Possible",
            Label::WeaklyPossible => "Weakly Possible",
            Label::NeutralContingent => "Neutral/Contingent",
        }
    }

    /// The axis this label speaks about, or `None` for "Neutral/Contingent".
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Label::LogicallyNecessary
            | Label::StronglyNecessary
            | Label::Necessary
            | Label::WeaklyNecessary => Some(Axis::Necessity),
            Label::LogicallyImpossible
            | Label::StronglyImpossible
            | Label::Impossible
            | Label::WeaklyImpossible => Some(Axis::Impossibility),
            Label::HighlyPossible | Label::VeryPossible | Label::Possible | Label::WeaklyPossible => {
                Some(Axis::Possibility)
            }
            Label::NeutralContingent => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores, label and explanation for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceResult {
    pub sentence: String,
    pub scores: ModalityScore,
    pub classification: Label,
    pub explanation: String,
    /// Modal indicators and structure, filled in only by
    /// [`AnalysisEngine::analyze_detailed`](crate::AnalysisEngine::analyze_detailed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SentenceAnalysis>,
}

/// Full outcome of analyzing a piece of text.
///
/// Serializes to the shape consumed by presentation layers:
/// `text`, `sentences`, `sentenceResults`, `scores`, `classification`,
/// `explanation`, `isParagraph`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(rename = "text")]
    pub original_text: String,
    pub sentences: Vec<String>,
    pub sentence_results: Vec<SentenceResult>,
    #[serde(rename = "scores")]
    pub aggregate_scores: ModalityScore,
    pub classification: Label,
    pub explanation: String,
    /// True iff the text segmented into more than one sentence.
    pub is_paragraph: bool,
}

impl AnalysisResult {
    /// The result as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
