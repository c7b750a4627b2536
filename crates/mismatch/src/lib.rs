use std::fmt;
use std::str::FromStr;

use drive_model::{Drive, DriveVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How each drive's deficit is weighted before summing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightMode {
    /// Weight by the demand itself; used before the aspiration pass.
    #[serde(rename = "profDemand")]
    ProfDemand,
    /// Weight by `max(surface, demand)`; used for the final mismatch.
    #[serde(rename = "mixedMax")]
    MixedMax,
}

impl WeightMode {
    pub fn weight(self, surface: f64, demand: f64) -> f64 {
        match self {
            Self::ProfDemand => demand,
            Self::MixedMax => surface.max(demand),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProfDemand => "profDemand",
            Self::MixedMax => "mixedMax",
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown weight mode: {0} (expected profDemand or mixedMax)")]
pub struct UnknownWeightMode(pub String);

impl FromStr for WeightMode {
    type Err = UnknownWeightMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "profDemand" | "prof_demand" => Ok(Self::ProfDemand),
            "mixedMax" | "mixed_max" => Ok(Self::MixedMax),
            other => Err(UnknownWeightMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MismatchProfile {
    /// Weighted deficit per drive.
    pub mismatch: DriveVector,
    pub total_deficit: f64,
}

impl MismatchProfile {
    /// Drive contributing the most to the total, if any contributes at all.
    pub fn largest_gap(&self) -> Option<(Drive, f64)> {
        let drive = self.mismatch.argmax();
        let value = self.mismatch[drive];
        (value > 0.0).then_some((drive, value))
    }
}

/// One-directional: exceeding demand is never penalized, only falling short.
pub fn compute_mismatch_from_effective_surface(
    effective_surface: &DriveVector,
    prof_demand: &DriveVector,
    mode: WeightMode,
) -> MismatchProfile {
    let mismatch = DriveVector::from_fn(|d| {
        let surface = effective_surface[d];
        let demand = prof_demand[d];
        let deficit = (demand - surface).max(0.0);
        deficit * mode.weight(surface, demand)
    });
    MismatchProfile {
        total_deficit: mismatch.sum(),
        mismatch,
    }
}
