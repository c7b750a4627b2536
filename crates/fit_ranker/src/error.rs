use std::io;
use std::path::PathBuf;

use drive_model::{Instrument, UnknownDrive};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitError {
    /// The user has not completed one of the three questionnaires.
    #[error("missing {0} instrument answers")]
    MissingInstrument(Instrument),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid {context} json: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown sort mode: {0} (expected mismatch, drain or overall)")]
    InvalidSortMode(String),

    #[error(transparent)]
    InvalidDrive(#[from] UnknownDrive),
}

impl FitError {
    pub(crate) fn json(context: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Json { context, source }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

pub type EngineResult<T> = Result<T, FitError>;
