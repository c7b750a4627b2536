use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::result::FitResult;

const SCORE_EPS: f64 = 1e-9;

/// Externally selectable ordering of fit results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Mismatch,
    Drain,
    /// Adjusted mismatch plus drained energy.
    Overall,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mismatch => "mismatch",
            Self::Drain => "drain",
            Self::Overall => "overall",
        }
    }

    pub fn primary(self, fit: &FitResult) -> f64 {
        match self {
            Self::Mismatch => fit.total_mismatch_adjusted,
            Self::Drain => fit.total_drained_energy,
            Self::Overall => fit.overall_score(),
        }
    }

    /// Primary metric, then drained energy, then name and major. For `Drain` the
    /// first two keys coincide, so equal drain falls through to name.
    pub fn compare(self, a: &FitResult, b: &FitResult) -> Ordering {
        cmp_asc_f64(self.primary(a), self.primary(b))
            .then_with(|| cmp_asc_f64(a.total_drained_energy, b.total_drained_energy))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.major.cmp(&b.major))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mismatch" => Ok(Self::Mismatch),
            "drain" => Ok(Self::Drain),
            "overall" => Ok(Self::Overall),
            _ => Err(FitError::InvalidSortMode(s.to_string())),
        }
    }
}

fn cmp_asc_f64(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= SCORE_EPS {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Stable, so results equal on every key keep their incoming order.
pub fn sort_fit_results(results: &mut [FitResult], mode: SortMode) {
    results.sort_by(|a, b| mode.compare(a, b));
}
