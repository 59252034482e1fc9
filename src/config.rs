//! Engine configuration.
//!
//! [`Thresholds`] carries every numeric constant used while scoring,
//! classifying and aggregating. [`RuleConfig`] carries the string rule tables.
//! Both default to the built-in values and can be overridden from TOML:
//!
//! ```toml
//! [thresholds]
//! consensus_boost = 1.25
//!
//! [rules]
//! necessity_patterns = ["all squares have four sides", "by definition"]
//! ```
//!
//! Omitted fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{ModalityError, ModalityResult};

/// Score a category must exceed before a label other than
/// "Neutral/Contingent" is assigned.
pub const CLASSIFICATION_THRESHOLD: f64 = 25.0;

/// Score below which a sentence counts as neutral in the dominant-modality
/// tally. Kept equal to [`CLASSIFICATION_THRESHOLD`].
pub const DOMINANT_THRESHOLD: f64 = 25.0;

/// Numeric constants for scoring, classification and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A category must score above this to be labelled. Default: 25.
    pub classification_threshold: f64,
    /// Below this a sentence is tallied as neutral. Default: 25.
    pub dominant_threshold: f64,
    /// Above this: "Logically …" / "Highly Possible". Default: 85.
    pub logical_tier: f64,
    /// Above this: "Strongly …" / "Very Possible". Default: 70.
    pub strong_tier: f64,
    /// Above this: plain "Necessary" / "Impossible" / "Possible". Default: 50.
    pub moderate_tier: f64,

    /// Necessity for an arithmetic equation shape. Default: 95.
    pub arithmetic_score: f64,
    /// Necessity for a necessity-table match. Default: 90.
    pub necessity_rule_score: f64,
    /// Impossibility for an impossibility-table match. Default: 95.
    pub impossibility_rule_score: f64,
    /// Possibility assigned alongside necessity is `necessity * factor`. Default: 0.2.
    pub necessity_possibility_factor: f64,
    /// ...capped at this value. Default: 20.
    pub necessity_possibility_cap: f64,

    /// Contingent cascade, step 1. Default: 60.
    pub epistemic_possibility: f64,
    /// Contingent cascade, step 2. Default: 50.
    pub deontic_possibility: f64,
    /// Contingent cascade, step 3. Default: 70.
    pub modal_possibility: f64,
    /// Contingent cascade, step 4. Default: 60.
    pub empirical_possibility: f64,

    /// Sentence weight is `chars / weight_divisor`. Default: 50.
    pub weight_divisor: f64,
    /// ...capped at this value. Default: 2.
    pub weight_cap: f64,
    /// Dampen every axis when the modal share is below this. Default: 0.3.
    pub neutral_ratio: f64,
    /// Dampening factor. Default: 0.7.
    pub neutral_damping: f64,
    /// Boost an axis whose dominance share exceeds this. Default: 0.6.
    pub consensus_share: f64,
    /// Consensus boost factor. Default: 1.3.
    pub consensus_boost: f64,
    /// Necessity factor when necessity strictly dominates the tally. Default: 1.1.
    pub necessity_bias_boost: f64,
    /// Impossibility factor when necessity strictly dominates the tally. Default: 0.8.
    pub necessity_bias_damping: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            classification_threshold: CLASSIFICATION_THRESHOLD,
            dominant_threshold: DOMINANT_THRESHOLD,
            logical_tier: 85.0,
            strong_tier: 70.0,
            moderate_tier: 50.0,
            arithmetic_score: 95.0,
            necessity_rule_score: 90.0,
            impossibility_rule_score: 95.0,
            necessity_possibility_factor: 0.2,
            necessity_possibility_cap: 20.0,
            epistemic_possibility: 60.0,
            deontic_possibility: 50.0,
            modal_possibility: 70.0,
            empirical_possibility: 60.0,
            weight_divisor: 50.0,
            weight_cap: 2.0,
            neutral_ratio: 0.3,
            neutral_damping: 0.7,
            consensus_share: 0.6,
            consensus_boost: 1.3,
            necessity_bias_boost: 1.1,
            necessity_bias_damping: 0.8,
        }
    }
}

impl Thresholds {
    /// Validate ranges and the relationships between values.
    pub fn validate(&self) -> ModalityResult<()> {
        let scores = [
            ("classification_threshold", self.classification_threshold),
            ("dominant_threshold", self.dominant_threshold),
            ("logical_tier", self.logical_tier),
            ("strong_tier", self.strong_tier),
            ("moderate_tier", self.moderate_tier),
            ("arithmetic_score", self.arithmetic_score),
            ("necessity_rule_score", self.necessity_rule_score),
            ("impossibility_rule_score", self.impossibility_rule_score),
            ("necessity_possibility_cap", self.necessity_possibility_cap),
            ("epistemic_possibility", self.epistemic_possibility),
            ("deontic_possibility", self.deontic_possibility),
            ("modal_possibility", self.modal_possibility),
            ("empirical_possibility", self.empirical_possibility),
        ];
        for (name, value) in scores {
            if !(0.0..=100.0).contains(&value) {
                return Err(ModalityError::Config(format!(
                    "{name} must be in [0, 100], got {value}"
                )));
            }
        }

        if self.classification_threshold != self.dominant_threshold {
            return Err(ModalityError::Config(format!(
                "classification_threshold ({}) and dominant_threshold ({}) must be equal",
                self.classification_threshold, self.dominant_threshold
            )));
        }

        if !(self.logical_tier > self.strong_tier
            && self.strong_tier > self.moderate_tier
            && self.moderate_tier > self.classification_threshold)
        {
            return Err(ModalityError::Config(format!(
                "tiers must be strictly descending above the threshold, got {} > {} > {} > {}",
                self.logical_tier,
                self.strong_tier,
                self.moderate_tier,
                self.classification_threshold
            )));
        }

        if !(self.weight_divisor.is_finite() && self.weight_divisor > 0.0) {
            return Err(ModalityError::Config(format!(
                "weight_divisor must be > 0, got {}",
                self.weight_divisor
            )));
        }
        if !(self.weight_cap.is_finite() && self.weight_cap > 0.0) {
            return Err(ModalityError::Config(format!(
                "weight_cap must be > 0, got {}",
                self.weight_cap
            )));
        }

        for (name, value) in [
            ("neutral_ratio", self.neutral_ratio),
            ("consensus_share", self.consensus_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModalityError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        for (name, value) in [
            ("necessity_possibility_factor", self.necessity_possibility_factor),
            ("neutral_damping", self.neutral_damping),
            ("consensus_boost", self.consensus_boost),
            ("necessity_bias_boost", self.necessity_bias_boost),
            ("necessity_bias_damping", self.necessity_bias_damping),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ModalityError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// String rule tables.
///
/// Patterns are regular expressions matched case-insensitively against the
/// lower-cased sentence. Exclusions and keywords are plain substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Numeric equation shape, checked before the necessity table.
    pub arithmetic_pattern: String,
    /// Canonical logical truths, definitional statements and meta-statements.
    pub necessity_patterns: Vec<String>,
    /// Self-contradictory constructions.
    pub impossibility_patterns: Vec<String>,
    /// Sentences *about* impossibility are never themselves impossible.
    pub impossibility_exclusions: Vec<String>,
    /// Certainty and belief vocabulary.
    pub epistemic_keywords: Vec<String>,
    /// Obligation and permission vocabulary.
    pub deontic_keywords: Vec<String>,
    /// Possibility modals.
    pub possibility_keywords: Vec<String>,
    /// Empirical and future markers.
    pub empirical_markers: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            arithmetic_pattern: r"\d+\s*[+\-*/]\s*\d+\s*=\s*\d+".to_string(),
            necessity_patterns: owned(&[
                r"\d+\s*[+\-*/]\s*\d+\s*=\s*\d+",
                "all triangles have three sides",
                "all squares have four sides",
                "all bachelors are unmarried",
                "all circles are round",
                "either.*or not",
                "by definition",
                "necessarily true",
                "logically necessary",
                "tautology",
                "axiom",
                "theorem",
                "contradictions are impossible",
                "cannot be both.*and.*simultaneously",
                "either.*proposition.*or.*not",
                "principles.*necessarily true",
                "logical system",
            ]),
            impossibility_patterns: owned(&[
                "married bachelor",
                "square circle",
                "round square",
                "something is both.*and not",
                "true and false",
                "exists and does not exist",
                "self-contradictory",
            ]),
            impossibility_exclusions: owned(&[
                "contradictions are impossible",
                "are logically impossible",
                "principles",
                "logical system",
            ]),
            epistemic_keywords: owned(&[
                "certain",
                "sure",
                "confident",
                "believe",
                "think",
                "know",
                "obvious",
            ]),
            deontic_keywords: owned(&[
                "must",
                "should",
                "ought",
                "required",
                "forbidden",
                "allowed",
                "permitted",
            ]),
            possibility_keywords: owned(&[
                "can", "could", "may", "might", "possible", "perhaps", "maybe", "likely", "probable",
            ]),
            empirical_markers: owned(&["weather", "tomorrow", "will happen", "probably"]),
        }
    }
}

/// Complete engine configuration: thresholds plus rule tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub thresholds: Thresholds,
    pub rules: RuleConfig,
}

impl AnalysisConfig {
    /// Validate thresholds. Rule patterns are checked when compiled.
    pub fn validate(&self) -> ModalityResult<()> {
        self.thresholds.validate()
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> ModalityResult<Self> {
        toml::from_str(content).map_err(|e| ModalityError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ModalityResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ModalityError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ModalityError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
