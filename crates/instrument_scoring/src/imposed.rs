use drive_model::{AnswerSet, DRIVE_CEILING, Drive, DriveVector};
use serde::{Deserialize, Serialize};

/// Items on the imposed questionnaire: one triplet per drive.
pub const IMPOSED_QUESTION_COUNT: usize = Drive::COUNT * 3;

/// The three consecutive imposed answers belonging to one drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImposedTriplet {
    pub env_scale: f64,
    pub env_magnitude: f64,
    pub self_drive: f64,
}

impl ImposedTriplet {
    pub fn read(answers: &AnswerSet, drive: Drive) -> Self {
        let start = drive.index() * 3 + 1;
        Self {
            env_scale: answers.answer(start),
            env_magnitude: answers.answer(start + 1),
            self_drive: answers.answer(start + 2),
        }
    }

    pub fn raw_score(&self) -> f64 {
        self.env_scale * self.env_magnitude / DRIVE_CEILING + self.self_drive
    }
}

pub fn raw_imposed_vector(answers: &AnswerSet) -> DriveVector {
    DriveVector::from_fn(|drive| ImposedTriplet::read(answers, drive).raw_score())
}

/// Rescales so the strongest drive sits exactly at the ceiling.
pub fn imposed_vector(answers: &AnswerSet) -> DriveVector {
    let raw = raw_imposed_vector(answers);
    let max = raw.max_value();
    if max <= 0.0 {
        return DriveVector::zero();
    }
    raw.map(|_, v| v / max * DRIVE_CEILING)
}

/// Per-drive inputs for the satisfaction scorer, read from the same triplets
/// as the imposed vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionInput {
    pub env: f64,
    pub competence: f64,
    pub self_interest: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionInputs {
    inputs: [SatisfactionInput; Drive::COUNT],
}

impl SatisfactionInputs {
    pub fn from_imposed(answers: &AnswerSet) -> Self {
        let mut out = Self::default();
        for drive in Drive::ALL {
            let t = ImposedTriplet::read(answers, drive);
            out.inputs[drive.index()] = SatisfactionInput {
                env: t.env_scale,
                competence: t.env_magnitude,
                self_interest: t.self_drive,
            };
        }
        out
    }

    pub fn get(&self, drive: Drive) -> SatisfactionInput {
        self.inputs[drive.index()]
    }

    pub fn set(&mut self, drive: Drive, input: SatisfactionInput) {
        self.inputs[drive.index()] = input;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Drive, SatisfactionInput)> + '_ {
        Drive::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

#[cfg(test)]
mod tests {
    use drive_model::{AnswerSet, Drive};

    use super::{ImposedTriplet, SatisfactionInputs, imposed_vector, raw_imposed_vector};

    #[test]
    fn triplets_start_at_drive_index_times_three_plus_one() {
        let answers = AnswerSet::from_answers(&[0, 0, 0, 4, 2, 3]);
        let t = ImposedTriplet::read(&answers, Drive::Achievement);
        assert_eq!(t.env_scale, 4.0);
        assert_eq!(t.env_magnitude, 2.0);
        assert_eq!(t.self_drive, 3.0);
        assert!((t.raw_score() - 4.6).abs() < 1e-12);
    }

    #[test]
    fn normalization_puts_strongest_drive_at_five() {
        // exploration raw = 5*5/5 + 5 = 10, achievement raw = 0 + 5 = 5
        let answers = AnswerSet::from_answers(&[5, 5, 5, 0, 0, 5]);
        let raw = raw_imposed_vector(&answers);
        assert_eq!(raw[Drive::Exploration], 10.0);

        let v = imposed_vector(&answers);
        assert_eq!(v[Drive::Exploration], 5.0);
        assert_eq!(v[Drive::Achievement], 2.5);
        assert_eq!(v[Drive::Value], 0.0);
    }

    #[test]
    fn all_zero_raw_scores_do_not_divide() {
        assert!(imposed_vector(&AnswerSet::new()).is_zero());
    }

    #[test]
    fn satisfaction_inputs_follow_triplets() {
        let mut answers = AnswerSet::new();
        answers.insert(19, 5);
        answers.insert(20, 2);
        answers.insert(21, 1);
        let inputs = SatisfactionInputs::from_imposed(&answers);
        let value = inputs.get(Drive::Value);
        assert_eq!(value.env, 5.0);
        assert_eq!(value.competence, 2.0);
        assert_eq!(value.self_interest, 1.0);
        assert_eq!(inputs.get(Drive::Care).env, 0.0);
    }
}
