//! Questionnaire scorers: each maps one instrument's answers to a `DriveVector`.
//!
//! Scoring is total over present answer sets. Missing answers read as 0; only an
//! absent answer set yields `None`.

mod formula;
mod imposed;

use drive_model::{AnswerSet, DriveVector, Instrument};

pub use formula::{Polarity, QUESTION_COUNT, Term, innate_terms, innate_vector, private_terms, private_vector};
pub use imposed::{
    IMPOSED_QUESTION_COUNT, ImposedTriplet, SatisfactionInput, SatisfactionInputs, imposed_vector,
    raw_imposed_vector,
};

pub fn score_innate(answers: Option<&AnswerSet>) -> Option<DriveVector> {
    answers.map(innate_vector)
}

pub fn score_private(answers: Option<&AnswerSet>) -> Option<DriveVector> {
    answers.map(private_vector)
}

pub fn score_imposed(answers: Option<&AnswerSet>) -> Option<DriveVector> {
    answers.map(imposed_vector)
}

pub fn score_instrument(instrument: Instrument, answers: Option<&AnswerSet>) -> Option<DriveVector> {
    match instrument {
        Instrument::Innate => score_innate(answers),
        Instrument::Private => score_private(answers),
        Instrument::Imposed => score_imposed(answers),
    }
}

#[cfg(test)]
mod tests {
    use drive_model::{AnswerSet, Drive, Instrument};

    use crate::{score_imposed, score_innate, score_instrument, score_private};

    #[test]
    fn absent_answer_set_scores_none() {
        assert!(score_innate(None).is_none());
        assert!(score_private(None).is_none());
        assert!(score_imposed(None).is_none());
    }

    #[test]
    fn all_zero_answers_score_all_zero() {
        let answers = AnswerSet::from_answers(&[0; 21]);
        for instrument in [Instrument::Innate, Instrument::Private, Instrument::Imposed] {
            let v = score_instrument(instrument, Some(&answers)).expect("present");
            assert!(v.is_zero(), "{instrument}: {v:?}");
        }
    }

    #[test]
    fn midpoint_answers_score_three_everywhere() {
        let answers = AnswerSet::from_answers(&[3; 21]);
        let innate = score_innate(Some(&answers)).expect("present");
        let private = score_private(Some(&answers)).expect("present");
        for drive in Drive::ALL {
            assert_eq!(innate[drive], 3.0);
            assert_eq!(private[drive], 3.0);
        }
    }

    #[test]
    fn short_answer_set_still_yields_full_vector() {
        let answers = AnswerSet::from_answers(&[5, 5]);
        let innate = score_innate(Some(&answers)).expect("present");
        assert!((innate[Drive::Exploration] - 10.0 / 6.0).abs() < 1e-12);
        assert_eq!(innate[Drive::Pleasure], 0.0);

        let imposed = score_imposed(Some(&answers)).expect("present");
        assert_eq!(imposed[Drive::Exploration], 5.0);
        assert_eq!(imposed.sum(), 5.0);
    }
}
