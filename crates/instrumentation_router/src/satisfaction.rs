use std::fmt;

use drive_model::{DRIVE_CEILING, DriveVector, clamp};
use instrument_scoring::{SatisfactionInput, SatisfactionInputs};
use serde::{Deserialize, Serialize};

/// Satisfaction below this labels a drive's outgoing routes as suppression.
pub const SUPPRESSION_THRESHOLD: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatisfactionWeights {
    pub competence: f64,
    pub self_interest: f64,
}

impl Default for SatisfactionWeights {
    fn default() -> Self {
        Self {
            competence: 0.5,
            self_interest: 0.5,
        }
    }
}

impl SatisfactionWeights {
    fn effective(self) -> (f64, f64) {
        let c = self.competence.max(0.0);
        let i = self.self_interest.max(0.0);
        if c + i <= f64::EPSILON { (0.5, 0.5) } else { (c, i) }
    }
}

/// How well environment demand matches competence and intrinsic interest, on
/// the drive scale: 5 is a perfect match.
pub fn satisfaction_score(input: SatisfactionInput, weights: SatisfactionWeights) -> f64 {
    let (wc, wi) = weights.effective();
    let gap = (wc * (input.env - input.competence).abs() + wi * (input.env - input.self_interest).abs())
        / (wc + wi);
    clamp(DRIVE_CEILING - gap, 0.0, DRIVE_CEILING)
}

pub fn satisfaction(inputs: &SatisfactionInputs, weights: SatisfactionWeights) -> DriveVector {
    DriveVector::from_fn(|drive| satisfaction_score(inputs.get(drive), weights))
}

/// Narrative label for a satisfaction score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionBand {
    Dissatisfied,
    Strained,
    Content,
    Fulfilled,
}

impl SatisfactionBand {
    pub fn classify(score: f64) -> Self {
        if score < 2.0 {
            Self::Dissatisfied
        } else if score < SUPPRESSION_THRESHOLD {
            Self::Strained
        } else if score < 4.0 {
            Self::Content
        } else {
            Self::Fulfilled
        }
    }

    pub fn is_suppressed(self) -> bool {
        matches!(self, Self::Dissatisfied | Self::Strained)
    }
}

impl fmt::Display for SatisfactionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dissatisfied => "dissatisfied",
            Self::Strained => "strained",
            Self::Content => "content",
            Self::Fulfilled => "fulfilled",
        };
        f.write_str(label)
    }
}
