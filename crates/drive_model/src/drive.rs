use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the seven personality drives.
///
/// Variant order is the display order; no computation depends on it except as a
/// deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Drive {
    #[serde(alias = "exploration")]
    Exploration,
    #[serde(alias = "achievement")]
    Achievement,
    #[serde(alias = "dominance")]
    Dominance,
    #[serde(alias = "pleasure")]
    Pleasure,
    #[serde(alias = "care")]
    Care,
    #[serde(alias = "affiliation")]
    Affiliation,
    #[serde(alias = "value")]
    Value,
}

impl Drive {
    pub const COUNT: usize = 7;

    pub const ALL: [Drive; Drive::COUNT] = [
        Drive::Exploration,
        Drive::Achievement,
        Drive::Dominance,
        Drive::Pleasure,
        Drive::Care,
        Drive::Affiliation,
        Drive::Value,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Exploration => "Exploration",
            Self::Achievement => "Achievement",
            Self::Dominance => "Dominance",
            Self::Pleasure => "Pleasure",
            Self::Care => "Care",
            Self::Affiliation => "Affiliation",
            Self::Value => "Value",
        }
    }
}

impl fmt::Display for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown drive: {0}")]
pub struct UnknownDrive(pub String);

impl FromStr for Drive {
    type Err = UnknownDrive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDrive(trimmed.to_string()))
    }
}
