//! The top-level analysis entry point.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::aggregate::ParagraphAggregator;
use crate::classify::Classifier;
use crate::config::{AnalysisConfig, Thresholds};
use crate::contingent::ContingentAnalyzer;
use crate::errors::ModalityResult;
use crate::explanation::ExplanationGenerator;
use crate::indicators::{SentenceAnalysis, SentenceAnalyzer};
use crate::patterns::{PatternMatcher, RuleTables};
use crate::scorer::SentenceScorer;
use crate::sentence::SentenceSplitter;
use crate::types::{AnalysisResult, Label, ModalityScore, SentenceResult};

static DEFAULT_ENGINE: Lazy<AnalysisEngine> = Lazy::new(AnalysisEngine::new);

/// Analyze text with the built-in rule tables and thresholds.
///
/// Total over every input string, including the empty string.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ENGINE.analyze(text)
}

/// Composes segmentation, scoring, classification, aggregation and
/// explanation.
///
/// Holds only read-only state; one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    rules: Arc<RuleTables>,
    thresholds: Thresholds,
    splitter: SentenceSplitter,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Engine with the built-in rule tables and default thresholds.
    pub fn new() -> Self {
        Self {
            rules: RuleTables::builtin(),
            thresholds: Thresholds::default(),
            splitter: SentenceSplitter::new(),
        }
    }

    /// Validate `config` and compile its rule tables.
    pub fn from_config(config: &AnalysisConfig) -> ModalityResult<Self> {
        config.validate()?;
        let rules = RuleTables::from_config(&config.rules)?;
        Ok(Self {
            rules: Arc::new(rules),
            thresholds: config.thresholds.clone(),
            splitter: SentenceSplitter::new(),
        })
    }

    pub fn rules(&self) -> &RuleTables {
        &self.rules
    }

    pub fn matcher(&self) -> PatternMatcher<'_> {
        PatternMatcher::new(&self.rules, &self.thresholds)
    }

    pub fn contingent(&self) -> ContingentAnalyzer<'_> {
        ContingentAnalyzer::new(self.rules.keywords(), &self.thresholds)
    }

    pub fn scorer(&self) -> SentenceScorer<'_> {
        SentenceScorer::new(&self.rules, &self.thresholds)
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.thresholds)
    }

    pub fn aggregator(&self) -> ParagraphAggregator<'_> {
        ParagraphAggregator::new(&self.thresholds)
    }

    pub fn explainer(&self) -> ExplanationGenerator {
        ExplanationGenerator::new(self.classifier())
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.run(text, false)
    }

    /// Like [`analyze`](Self::analyze), and also attach a
    /// [`SentenceAnalysis`] to every sentence result. Scores, labels and
    /// explanations are identical to `analyze`.
    pub fn analyze_detailed(&self, text: &str) -> AnalysisResult {
        self.run(text, true)
    }

    fn score_sentence(
        &self,
        scorer: &SentenceScorer<'_>,
        classifier: &Classifier,
        sentence: &str,
        detailed: bool,
    ) -> (ModalityScore, Label, Option<SentenceAnalysis>) {
        let (scores, trace) = scorer.score_with_trace(sentence);
        let label = classifier.classify(&scores);
        let analysis = detailed.then(|| SentenceAnalyzer::analyze(sentence).with_cascade(trace));
        (scores, label, analysis)
    }

    fn run(&self, text: &str, detailed: bool) -> AnalysisResult {
        let sentences = self.splitter.split(text);
        let scorer = self.scorer();
        let classifier = self.classifier();
        let explainer = self.explainer();

        match sentences.len() {
            0 => {
                let label = classifier.classify(&ModalityScore::ZERO);
                AnalysisResult {
                    original_text: text.to_string(),
                    sentences,
                    sentence_results: Vec::new(),
                    aggregate_scores: ModalityScore::ZERO,
                    classification: label,
                    explanation: explainer.empty(label),
                    is_paragraph: false,
                }
            }
            1 => {
                let (scores, label, analysis) =
                    self.score_sentence(&scorer, &classifier, &sentences[0], detailed);
                let explanation = explainer.single(label);
                let result = SentenceResult {
                    sentence: sentences[0].clone(),
                    scores,
                    classification: label,
                    explanation: explanation.clone(),
                    analysis,
                };
                AnalysisResult {
                    original_text: text.to_string(),
                    sentences,
                    sentence_results: vec![result],
                    aggregate_scores: scores,
                    classification: label,
                    explanation,
                    is_paragraph: false,
                }
            }
            count => {
                log::debug!("analyzing paragraph of {count} sentences");
                let sentence_results = sentences
                    .iter()
                    .map(|sentence| {
                        let (scores, label, analysis) =
                            self.score_sentence(&scorer, &classifier, sentence, detailed);
                        SentenceResult {
                            sentence: sentence.clone(),
                            scores,
                            classification: label,
                            explanation: explainer.sentence(label),
                            analysis,
                        }
                    })
                    .collect::<Vec<_>>();

                let aggregate_scores = self.aggregator().aggregate(&sentence_results);
                let label = classifier.classify(&aggregate_scores);
                let explanation = explainer.paragraph(&sentence_results, &aggregate_scores, label);

                AnalysisResult {
                    original_text: text.to_string(),
                    sentences,
                    sentence_results,
                    aggregate_scores,
                    classification: label,
                    explanation,
                    is_paragraph: true,
                }
            }
        }
    }
}
