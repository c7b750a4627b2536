use std::fs;
use std::path::Path;

use drain_adjuster::AspirationConfig;
use instrumentation_router::{RoutePolicy, SatisfactionWeights};
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, FitError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Length of the `top` and `bottom` slices of a ranking.
    pub slice_len: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { slice_len: 3 }
    }
}

/// Engine coefficients. Every section is optional in JSON and falls back to
/// its defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub routing: RoutePolicy,
    pub satisfaction: SatisfactionWeights,
    pub aspiration: AspirationConfig,
    pub ranking: RankingConfig,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        serde_json::from_str(raw).map_err(FitError::json("config"))
    }

    pub fn load(path: &Path) -> EngineResult<Self> {
        let raw = fs::read_to_string(path).map_err(FitError::io(path))?;
        Self::from_json_str(&raw)
    }
}
