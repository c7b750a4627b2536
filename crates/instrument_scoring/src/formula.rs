use drive_model::{AnswerSet, Drive, DriveVector, MAX_ANSWER};

/// Items on the innate and private questionnaires.
pub const QUESTION_COUNT: usize = 21;

const REVERSAL_BASE: f64 = MAX_ANSWER as f64 + 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Direct,
    Reversed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
    pub question: usize,
    pub polarity: Polarity,
}

impl Term {
    pub fn inverted(self) -> Self {
        let polarity = match self.polarity {
            Polarity::Direct => Polarity::Reversed,
            Polarity::Reversed => Polarity::Direct,
        };
        Self { polarity, ..self }
    }

    pub fn evaluate(self, answers: &AnswerSet) -> f64 {
        let a = answers.answer(self.question);
        match self.polarity {
            Polarity::Direct => a,
            // unanswered stays neutral instead of scoring as the maximum
            Polarity::Reversed if a == 0.0 => 0.0,
            Polarity::Reversed => REVERSAL_BASE - a,
        }
    }
}

const fn d(question: usize) -> Term {
    Term {
        question,
        polarity: Polarity::Direct,
    }
}

const fn r(question: usize) -> Term {
    Term {
        question,
        polarity: Polarity::Reversed,
    }
}

/// Innate item loadings, indexed by `Drive::index()`. The private
/// questionnaire reuses the same items with every polarity flipped.
const INNATE_FORMULA: [&[Term]; Drive::COUNT] = [
    &[d(1), d(2), d(3), d(13), d(16), d(19)],
    &[r(4), d(5), d(6), d(11), d(20)],
    &[d(7), d(8), r(9), d(14), r(21)],
    &[d(10), r(11), d(12), d(17)],
    &[r(6), r(13), d(14), d(15), d(18)],
    &[r(2), d(16), d(17), r(18)],
    &[d(7), r(12), d(19), r(20), d(21)],
];

pub fn innate_terms(drive: Drive) -> &'static [Term] {
    INNATE_FORMULA[drive.index()]
}

pub fn private_terms(drive: Drive) -> impl Iterator<Item = Term> {
    innate_terms(drive).iter().map(|t| t.inverted())
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

pub fn innate_vector(answers: &AnswerSet) -> DriveVector {
    DriveVector::from_fn(|drive| mean(innate_terms(drive).iter().map(|t| t.evaluate(answers))))
}

pub fn private_vector(answers: &AnswerSet) -> DriveVector {
    DriveVector::from_fn(|drive| mean(private_terms(drive).map(|t| t.evaluate(answers))))
}
