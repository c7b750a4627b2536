//! End-to-end occupational fit: scores a user profile against occupation
//! subtypes and ranks the results.

mod catalog;
mod config;
mod error;
mod profile;
mod ranker;
mod result;
mod sort;

pub use catalog::{OccupationSubtype, load_answers, load_catalog, parse_answers, parse_catalog};
pub use config::{EngineConfig, RankingConfig};
pub use error::{EngineResult, FitError};
pub use profile::UserProfile;
pub use ranker::{CUSTOM_MAJOR, FitRanker};
pub use result::{FitResult, RankedFits};
pub use sort::{SortMode, sort_fit_results};
