//! Paragraph-level aggregation.
//!
//! Sentence scores are combined by a length-weighted mean, then adjusted from
//! the distribution of dominant modalities. The adjustments run in a fixed
//! order and each one sees the output of the previous:
//!
//! 1. mostly-neutral paragraphs are dampened on every axis,
//! 2. an axis that dominates a clear majority of sentences is boosted,
//! 3. when necessity strictly leads the tally, necessity is boosted and
//!    impossibility dampened.

use crate::classify::Classifier;
use crate::config::Thresholds;
use crate::types::{clamp_score, Axis, ModalityScore, SentenceResult, SCORE_MAX, SCORE_MIN};

/// Count of sentences per dominant modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distribution {
    pub necessity: usize,
    pub possibility: usize,
    pub impossibility: usize,
    pub neutral: usize,
}

impl Distribution {
    /// Tally the dominant modality of every sentence.
    pub fn tally(results: &[SentenceResult], classifier: &Classifier) -> Self {
        let mut distribution = Self::default();
        for result in results {
            match classifier.dominant(&result.scores) {
                Some(axis) => *distribution.count_mut(axis) += 1,
                None => distribution.neutral += 1,
            }
        }
        distribution
    }

    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Necessity => self.necessity,
            Axis::Possibility => self.possibility,
            Axis::Impossibility => self.impossibility,
        }
    }

    fn count_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Necessity => &mut self.necessity,
            Axis::Possibility => &mut self.possibility,
            Axis::Impossibility => &mut self.impossibility,
        }
    }

    /// Sentences with a dominant axis.
    pub fn modal_count(&self) -> usize {
        self.necessity + self.possibility + self.impossibility
    }

    pub fn total(&self) -> usize {
        self.modal_count() + self.neutral
    }

    /// Fraction of all sentences dominated by `axis`.
    pub fn share(&self, axis: Axis) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.count(axis) as f64 / self.total() as f64
    }

    /// Non-zero tallies in the order necessity, possibility, impossibility,
    /// neutral.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        [
            (Axis::Necessity.name(), self.necessity),
            (Axis::Possibility.name(), self.possibility),
            (Axis::Impossibility.name(), self.impossibility),
            ("neutral", self.neutral),
        ]
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .collect()
    }
}

/// Combines sentence results into one paragraph score.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphAggregator<'a> {
    thresholds: &'a Thresholds,
    classifier: Classifier,
}

impl<'a> ParagraphAggregator<'a> {
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self {
            thresholds,
            classifier: Classifier::new(thresholds),
        }
    }

    /// Weight of a sentence: longer sentences count more, up to the cap.
    pub fn weight(&self, sentence: &str) -> f64 {
        (sentence.chars().count() as f64 / self.thresholds.weight_divisor)
            .min(self.thresholds.weight_cap)
    }

    pub fn aggregate(&self, results: &[SentenceResult]) -> ModalityScore {
        match results {
            [] => return ModalityScore::ZERO,
            [single] => return single.scores,
            _ => {}
        }

        let mut total_weight = 0.0;
        let mut weighted = ModalityScore::ZERO;
        for result in results {
            let weight = self.weight(&result.sentence);
            log::trace!("sentence weight {weight:.3} for {:?}", result.sentence);
            total_weight += weight;
            for axis in Axis::ALL {
                *weighted.get_mut(axis) += result.scores.get(axis) * weight;
            }
        }
        if total_weight <= 0.0 {
            return ModalityScore::ZERO;
        }
        for axis in Axis::ALL {
            *weighted.get_mut(axis) /= total_weight;
        }

        let distribution = Distribution::tally(results, &self.classifier);
        self.adjust(weighted, &distribution).clamped()
    }

    fn adjust(&self, mut scores: ModalityScore, distribution: &Distribution) -> ModalityScore {
        let t = self.thresholds;
        let total = distribution.total() as f64;

        let modal_ratio = distribution.modal_count() as f64 / total;
        if modal_ratio < t.neutral_ratio {
            log::debug!("modal ratio {modal_ratio:.2} below {}, dampening", t.neutral_ratio);
            for axis in Axis::ALL {
                *scores.get_mut(axis) *= t.neutral_damping;
            }
        }

        for axis in Axis::ALL {
            if distribution.share(axis) > t.consensus_share {
                log::debug!("{axis} consensus, boosting by {}", t.consensus_boost);
                let value = scores.get_mut(axis);
                *value = SCORE_MAX.min(*value * t.consensus_boost);
            }
        }

        if distribution.necessity > distribution.impossibility
            && distribution.necessity > distribution.possibility
        {
            log::debug!("necessity leads the tally, applying necessity bias");
            scores.necessity = SCORE_MAX.min(scores.necessity * t.necessity_bias_boost);
            scores.impossibility = clamp_score(
                scores.impossibility * t.necessity_bias_damping,
                SCORE_MIN,
                SCORE_MAX,
            );
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;

    fn result(sentence: &str, n: f64, p: f64, i: f64) -> SentenceResult {
        SentenceResult {
            sentence: sentence.to_string(),
            scores: ModalityScore::new(n, p, i),
            classification: Label::NeutralContingent,
            explanation: String::new(),
            analysis: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_is_zero() {
        let thresholds = Thresholds::default();
        assert_eq!(
            ParagraphAggregator::new(&thresholds).aggregate(&[]),
            ModalityScore::ZERO
        );
    }

    #[test]
    fn single_passes_through() {
        let thresholds = Thresholds::default();
        let only = result("Hi.", 12.5, 33.0, 0.0);
        assert_eq!(
            ParagraphAggregator::new(&thresholds).aggregate(&[only.clone()]),
            only.scores
        );
    }

    #[test]
    fn weight_is_capped() {
        let thresholds = Thresholds::default();
        let aggregator = ParagraphAggregator::new(&thresholds);
        assert_close(aggregator.weight("abcde"), 0.1);
        assert_close(aggregator.weight(&"x".repeat(500)), 2.0);
        // chars, not bytes
        assert_close(aggregator.weight("ééééé"), 0.1);
    }

    #[test]
    fn long_necessity_outweighs_short_neutral() {
        let thresholds = Thresholds::default();
        let long = "All triangles have three sides and every geometry textbook agrees on this";
        let results = [result(long, 90.0, 18.0, 0.0), result("Hello there.", 0.0, 0.0, 0.0)];
        let scores = ParagraphAggregator::new(&thresholds).aggregate(&results);

        // 1 necessity, 1 neutral: no dampening, no consensus, necessity bias applies.
        assert_close(scores.necessity, 85.02352941176471);
        assert_close(scores.possibility, 15.458823529411767);
        assert_eq!(scores.impossibility, 0.0);
        assert!(scores.necessity > 45.0 && scores.necessity < 90.0);
    }

    #[test]
    fn mostly_neutral_is_dampened() {
        let thresholds = Thresholds::default();
        let results = [
            result("The cat sat", 0.0, 0.0, 0.0),
            result("The dog ran", 0.0, 0.0, 0.0),
            result("Birds fly south", 0.0, 0.0, 0.0),
            result("You should leave.", 0.0, 50.0, 0.0),
        ];
        let scores = ParagraphAggregator::new(&thresholds).aggregate(&results);
        assert_close(scores.possibility, 11.018518518518517);
        assert_eq!(scores.necessity, 0.0);
    }

    #[test]
    fn consensus_boost_then_necessity_bias_caps_at_100() {
        let thresholds = Thresholds::default();
        let results = [
            result("In formal logic, contradictions are impossible", 90.0, 18.0, 0.0),
            result("A statement cannot be both true and false simultaneously", 90.0, 18.0, 0.0),
            result("Either a proposition holds or it does not", 90.0, 18.0, 0.0),
            result("These principles are necessarily true in any logical system.", 90.0, 18.0, 0.0),
        ];
        let scores = ParagraphAggregator::new(&thresholds).aggregate(&results);
        assert_eq!(scores.necessity, 100.0);
        assert_close(scores.possibility, 18.0);
        assert_eq!(scores.impossibility, 0.0);
    }

    #[test]
    fn possibility_consensus() {
        let thresholds = Thresholds::default();
        let results = [
            result("You must pay rent", 0.0, 50.0, 0.0),
            result("I think so.", 0.0, 60.0, 0.0),
        ];
        let scores = ParagraphAggregator::new(&thresholds).aggregate(&results);
        assert_close(scores.possibility, 70.10714285714285);
    }

    #[test]
    fn consensus_needs_more_than_the_share() {
        let thresholds = Thresholds::default();
        let sentence = "x".repeat(50);
        let aggregate = |possible: usize| {
            let results = (0..5)
                .map(|i| {
                    let p = if i < possible { 50.0 } else { 0.0 };
                    result(&sentence, 0.0, p, 0.0)
                })
                .collect::<Vec<_>>();
            ParagraphAggregator::new(&thresholds).aggregate(&results)
        };

        // 3 of 5 is exactly the 0.6 share: no boost.
        assert_eq!(aggregate(3).possibility, 30.0);
        assert_close(aggregate(4).possibility, 40.0 * 1.3);
    }

    #[test]
    fn necessity_bias_dampens_impossibility() {
        let thresholds = Thresholds::default();
        let sentence = "x".repeat(50);
        let results = [
            result(&sentence, 90.0, 18.0, 0.0),
            result(&sentence, 90.0, 18.0, 0.0),
            result(&sentence, 0.0, 0.0, 95.0),
        ];
        let scores = ParagraphAggregator::new(&thresholds).aggregate(&results);
        // necessity share 2/3 > 0.6: 60 * 1.3 = 78, then * 1.1
        assert_close(scores.necessity, 60.0 * 1.3 * 1.1);
        assert_close(scores.impossibility, 95.0 / 3.0 * 0.8);
    }

    #[test]
    fn distribution_tally() {
        let classifier = Classifier::default();
        let results = [
            result("a", 90.0, 18.0, 0.0),
            result("b", 0.0, 60.0, 0.0),
            result("c", 0.0, 0.0, 95.0),
            result("d", 0.0, 0.0, 0.0),
            result("e", 0.0, 50.0, 0.0),
        ];
        let distribution = Distribution::tally(&results, &classifier);
        assert_eq!(
            distribution,
            Distribution {
                necessity: 1,
                possibility: 2,
                impossibility: 1,
                neutral: 1,
            }
        );
        assert_eq!(distribution.modal_count(), 4);
        assert_eq!(distribution.total(), 5);
        assert!((distribution.share(Axis::Possibility) - 0.4).abs() < 1e-12);
        assert_eq!(
            distribution.entries(),
            vec![
                ("necessity", 1),
                ("possibility", 2),
                ("impossibility", 1),
                ("neutral", 1)
            ]
        );
    }
}
