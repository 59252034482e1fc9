//! Alethic modality scoring for natural-language text.
//!
//! Text is scored on three independent axes (necessity, possibility and
//! impossibility), per sentence and for the text as a whole, and given a
//! classification label with a short explanation.
//!
//! The engine is deterministic and rule-table driven:
//!
//! - [`SentenceSplitter`] - segments text on terminal punctuation
//! - [`PatternMatcher`] - detects logical truths and self-contradictions
//! - [`ContingentAnalyzer`] - scores everything else from modal keywords
//! - [`SentenceScorer`] - one score triple per sentence
//! - [`Classifier`] - maps a score triple to a [`Label`]
//! - [`ParagraphAggregator`] - weighted, distribution-adjusted paragraph score
//! - [`ExplanationGenerator`] - textual summary of the result
//! - [`AnalysisEngine`] - composes all of the above
//!
//! [`AnalysisEngine::analyze_detailed`] additionally attaches a read-only
//! [`SentenceAnalysis`] (modal indicators, tags, structural flags) to each
//! sentence result.
//!
//! ## Example
//!
//! ```
//! use alethic_modality::{analyze, Label};
//!
//! let result = analyze("2 + 2 = 4");
//! assert_eq!(result.classification, Label::LogicallyNecessary);
//! assert_eq!(result.aggregate_scores.necessity, 95.0);
//! assert!(!result.is_paragraph);
//! ```
//!
//! Custom rule tables and thresholds are loaded through [`AnalysisConfig`]
//! and compiled once by [`AnalysisEngine::from_config`].

mod aggregate;
mod classify;
mod config;
mod contingent;
mod display;
mod engine;
mod errors;
mod explanation;
mod indicators;
mod patterns;
mod scorer;
mod sentence;
mod types;

pub use aggregate::{Distribution, ParagraphAggregator};
pub use classify::Classifier;
pub use config::{
    AnalysisConfig, RuleConfig, Thresholds, CLASSIFICATION_THRESHOLD, DOMINANT_THRESHOLD,
};
pub use contingent::{CascadeHit, CascadeStep, ContingentAnalyzer};
pub use display::AnalysisDisplay;
pub use engine::{analyze, AnalysisEngine};
pub use errors::{ModalityError, ModalityResult};
pub use explanation::ExplanationGenerator;
pub use indicators::{
    ModalIndicators, SentenceAnalysis, SentenceAnalyzer, SentenceStructure, Tag, TaggedToken,
    Tense,
};
pub use patterns::{KeywordTables, PatternMatcher, RuleKind, RuleMatch, RuleTables};
pub use scorer::SentenceScorer;
pub use sentence::SentenceSplitter;
pub use types::{
    clamp_score, AnalysisResult, Axis, Label, ModalityScore, SentenceResult, SCORE_MAX, SCORE_MIN,
};
