//! Threshold-based classification.
//!
//! When categories tie at the maximum, necessity is preferred over
//! impossibility, and impossibility over possibility.

use crate::config::Thresholds;
use crate::types::{Axis, Label, ModalityScore};

/// Maps a score triple to a [`Label`] and picks a sentence's dominant axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    threshold: f64,
    dominant_threshold: f64,
    logical_tier: f64,
    strong_tier: f64,
    moderate_tier: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

impl Classifier {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            threshold: thresholds.classification_threshold,
            dominant_threshold: thresholds.dominant_threshold,
            logical_tier: thresholds.logical_tier,
            strong_tier: thresholds.strong_tier,
            moderate_tier: thresholds.moderate_tier,
        }
    }

    pub fn classify(&self, scores: &ModalityScore) -> Label {
        let max = scores.max_value();

        Axis::PRIORITY
            .into_iter()
            .find(|&axis| {
                let value = scores.get(axis);
                value == max && value > self.threshold
            })
            .map_or(Label::NeutralContingent, |axis| {
                self.tier(axis, scores.get(axis))
            })
    }

    fn tier(&self, axis: Axis, value: f64) -> Label {
        let rank = if value > self.logical_tier {
            0
        } else if value > self.strong_tier {
            1
        } else if value > self.moderate_tier {
            2
        } else {
            3
        };

        const NECESSITY: [Label; 4] = [
            Label::LogicallyNecessary,
            Label::StronglyNecessary,
            Label::Necessary,
            Label::WeaklyNecessary,
        ];
        const IMPOSSIBILITY: [Label; 4] = [
            Label::LogicallyImpossible,
            Label::StronglyImpossible,
            Label::Impossible,
            Label::WeaklyImpossible,
        ];
        const POSSIBILITY: [Label; 4] = [
            Label::HighlyPossible,
            Label::VeryPossible,
            Label::Possible,
            Label::WeaklyPossible,
        ];

        match axis {
            Axis::Necessity => NECESSITY[rank],
            Axis::Impossibility => IMPOSSIBILITY[rank],
            Axis::Possibility => POSSIBILITY[rank],
        }
    }

    /// The axis a sentence is tallied under, or `None` when it is neutral.
    ///
    /// A maximum below the dominant threshold is neutral; ties follow the
    /// same priority as [`Classifier::classify`].
    pub fn dominant(&self, scores: &ModalityScore) -> Option<Axis> {
        let max = scores.max_value();
        if max < self.dominant_threshold {
            return None;
        }
        Axis::PRIORITY
            .into_iter()
            .find(|&axis| scores.get(axis) == max)
    }
}
