use drive_model::{DriveVector, Instrument, UserAnswers};
use instrument_scoring::{SatisfactionInputs, imposed_vector, score_innate, score_private};
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, FitError};

/// A user's three instrument averages plus the imposed triplets the
/// satisfaction scorer reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub innate: DriveVector,
    pub surface: DriveVector,
    pub imposed: DriveVector,
    pub satisfaction_inputs: SatisfactionInputs,
}

impl UserProfile {
    /// Satisfaction inputs default to zero, which scores every drive as
    /// fully satisfied; use `with_satisfaction_inputs` when triplets are known.
    pub fn from_vectors(innate: DriveVector, surface: DriveVector, imposed: DriveVector) -> Self {
        Self {
            innate,
            surface,
            imposed,
            satisfaction_inputs: SatisfactionInputs::default(),
        }
    }

    pub fn with_satisfaction_inputs(mut self, inputs: SatisfactionInputs) -> Self {
        self.satisfaction_inputs = inputs;
        self
    }

    /// Fails only when a whole instrument is absent; partial answer sets
    /// score with missing items read as 0.
    pub fn from_answers(answers: &UserAnswers) -> EngineResult<Self> {
        let innate = score_innate(answers.innate.as_ref())
            .ok_or(FitError::MissingInstrument(Instrument::Innate))?;
        let surface = score_private(answers.private.as_ref())
            .ok_or(FitError::MissingInstrument(Instrument::Private))?;
        let imposed_answers = answers
            .imposed
            .as_ref()
            .ok_or(FitError::MissingInstrument(Instrument::Imposed))?;
        Ok(Self {
            innate,
            surface,
            imposed: imposed_vector(imposed_answers),
            satisfaction_inputs: SatisfactionInputs::from_imposed(imposed_answers),
        })
    }
}

#[cfg(test)]
mod tests {
    use drive_model::{AnswerSet, Drive, Instrument, UserAnswers};

    use crate::{FitError, UserProfile};

    #[test]
    fn scores_all_three_instruments() {
        let answers = UserAnswers {
            innate: Some(AnswerSet::from_answers(&[3; 21])),
            private: Some(AnswerSet::from_answers(&[3; 21])),
            imposed: Some(AnswerSet::from_answers(&[5, 5, 5])),
        };
        let user = UserProfile::from_answers(&answers).expect("profile");
        assert_eq!(user.innate[Drive::Care], 3.0);
        assert_eq!(user.surface[Drive::Value], 3.0);
        assert_eq!(user.imposed[Drive::Exploration], 5.0);
        assert_eq!(user.satisfaction_inputs.get(Drive::Exploration).env, 5.0);
    }

    #[test]
    fn missing_instrument_is_an_error() {
        let answers = UserAnswers {
            innate: Some(AnswerSet::new()),
            private: Some(AnswerSet::new()),
            imposed: None,
        };
        let err = UserProfile::from_answers(&answers).expect_err("missing");
        assert!(matches!(err, FitError::MissingInstrument(Instrument::Imposed)));
        assert_eq!(err.to_string(), "missing imposed instrument answers");
    }

    #[test]
    fn empty_instruments_still_profile() {
        let answers = UserAnswers {
            innate: Some(AnswerSet::new()),
            private: Some(AnswerSet::new()),
            imposed: Some(AnswerSet::new()),
        };
        let user = UserProfile::from_answers(&answers).expect("profile");
        assert!(user.innate.is_zero() && user.surface.is_zero() && user.imposed.is_zero());
    }
}
