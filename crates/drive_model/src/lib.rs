mod answers;
mod drive;
mod vector;

pub use answers::{AnswerSet, Instrument, MAX_ANSWER, UserAnswers};
pub use drive::{Drive, UnknownDrive};
pub use vector::{DRIVE_CEILING, DriveVector, clamp, clamp01};
