use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use drive_model::{DRIVE_CEILING, Drive, DriveVector, UserAnswers};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, FitError};

/// One occupation subtype and the drive profile it demands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupationSubtype {
    pub major: String,
    pub name: String,
    pub drives: DriveVector,
}

impl OccupationSubtype {
    /// Demand components are clamped to `[0, 5]`.
    pub fn new(major: impl Into<String>, name: impl Into<String>, drives: DriveVector) -> Self {
        Self {
            major: major.into(),
            name: name.into(),
            drives: drives.clamped(0.0, DRIVE_CEILING),
        }
    }

    /// Builds a subtype from a partial demand map; absent drives demand 0.
    pub fn from_partial(
        major: impl Into<String>,
        name: impl Into<String>,
        demand: &BTreeMap<Drive, f64>,
    ) -> Self {
        Self::new(major, name, DriveVector::from(demand.clone()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<OccupationSubtype>),
    Wrapped { subtypes: Vec<OccupationSubtype> },
}

/// Accepts either a bare array of subtypes or `{ "subtypes": [...] }`.
pub fn parse_catalog(raw: &str) -> EngineResult<Vec<OccupationSubtype>> {
    let parsed = serde_json::from_str::<CatalogFile>(raw).map_err(FitError::json("catalog"))?;
    let subtypes = match parsed {
        CatalogFile::List(list) => list,
        CatalogFile::Wrapped { subtypes } => subtypes,
    };
    Ok(subtypes
        .into_iter()
        .map(|s| {
            let clamped = s.drives.clamped(0.0, DRIVE_CEILING);
            if clamped != s.drives {
                warn!("catalog entry {:?} has demands outside 0..=5; clamping", s.name);
            }
            OccupationSubtype {
                drives: clamped,
                ..s
            }
        })
        .collect())
}

pub fn load_catalog(path: &Path) -> EngineResult<Vec<OccupationSubtype>> {
    let raw = fs::read_to_string(path).map_err(FitError::io(path))?;
    let catalog = parse_catalog(&raw)?;
    debug!("loaded {} occupation subtypes from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn parse_answers(raw: &str) -> EngineResult<UserAnswers> {
    serde_json::from_str(raw).map_err(FitError::json("answers"))
}

pub fn load_answers(path: &Path) -> EngineResult<UserAnswers> {
    let raw = fs::read_to_string(path).map_err(FitError::io(path))?;
    parse_answers(&raw)
}
