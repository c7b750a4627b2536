use drive_model::{AnswerSet, Drive};
use instrument_scoring::{imposed_vector, innate_vector, private_vector, raw_imposed_vector};
use proptest::prelude::*;

proptest! {
    #[test]
    fn innate_and_private_are_complementary(answers in prop::collection::vec(1u8..=5, 21)) {
        let set = AnswerSet::from_answers(&answers);
        let innate = innate_vector(&set);
        let private = private_vector(&set);
        for drive in Drive::ALL {
            prop_assert!((innate[drive] + private[drive] - 6.0).abs() < 1e-9);
        }
    }

    #[test]
    fn imposed_peak_is_five_unless_all_raw_zero(answers in prop::collection::vec(0u8..=5, 0..=21)) {
        let set = AnswerSet::from_answers(&answers);
        let raw = raw_imposed_vector(&set);
        let v = imposed_vector(&set);
        if raw.max_value() == 0.0 {
            prop_assert!(v.is_zero());
        } else {
            prop_assert!((v.max_value() - 5.0).abs() < 1e-12);
            prop_assert!(v.iter().all(|(_, x)| (0.0..=5.0 + 1e-12).contains(&x)));
        }
    }

    #[test]
    fn scores_stay_within_answer_range(answers in prop::collection::vec(0u8..=5, 0..=21)) {
        let set = AnswerSet::from_answers(&answers);
        for v in [innate_vector(&set), private_vector(&set)] {
            prop_assert!(v.iter().all(|(_, x)| (0.0..=5.0).contains(&x)));
        }
    }
}
