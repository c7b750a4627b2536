use drive_model::DriveVector;
use instrumentation_router::RouteSet;
use mismatch::MismatchProfile;
use serde::{Deserialize, Serialize};

/// Full computation output for one (user, occupation) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub major: String,
    pub name: String,
    pub innate_avg: DriveVector,
    pub surface_avg: DriveVector,
    pub imposed_avg: DriveVector,
    pub prof_demand: DriveVector,
    pub routes: RouteSet,
    pub surface_drain: DriveVector,
    pub surface_transfer: DriveVector,
    pub surface_adjusted: DriveVector,
    pub surface_adjusted_aspired: DriveVector,
    pub mismatch_raw: MismatchProfile,
    pub mismatch_adjusted: MismatchProfile,
    pub total_mismatch_raw: f64,
    pub total_mismatch_adjusted: f64,
    pub total_drained_energy: f64,
}

impl FitResult {
    pub fn overall_score(&self) -> f64 {
        self.total_mismatch_adjusted + self.total_drained_energy
    }
}

/// A ranked catalog: best fit first, with the best and worst few pulled out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedFits {
    pub results: Vec<FitResult>,
    pub top: Vec<FitResult>,
    /// Worst fit first.
    pub bottom: Vec<FitResult>,
}

impl RankedFits {
    pub fn from_sorted(results: Vec<FitResult>, slice_len: usize) -> Self {
        let top = results.iter().take(slice_len).cloned().collect();
        let bottom = results.iter().rev().take(slice_len).cloned().collect();
        Self {
            results,
            top,
            bottom,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn best(&self) -> Option<&FitResult> {
        self.results.first()
    }
}
