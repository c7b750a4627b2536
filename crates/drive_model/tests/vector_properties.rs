use drive_model::{AnswerSet, DRIVE_CEILING, Drive, DriveVector, MAX_ANSWER};
use proptest::prelude::*;

fn vector(values: [f64; 7]) -> DriveVector {
    DriveVector::from_fn(|d| values[d.index()])
}

proptest! {
    #[test]
    fn clamped_stays_in_range(values in prop::array::uniform7(-20.0..20.0f64)) {
        let v = vector(values).clamped(0.0, DRIVE_CEILING);
        for (_, x) in v.iter() {
            prop_assert!((0.0..=DRIVE_CEILING).contains(&x));
        }
    }

    #[test]
    fn argmax_picks_a_maximal_component(values in prop::array::uniform7(0.0..5.0f64)) {
        let v = vector(values);
        let top = v.argmax();
        prop_assert_eq!(v[top], v.max_value());
        for d in Drive::ALL.into_iter().filter(|d| *d < top) {
            prop_assert!(v[d] < v[top]);
        }
    }

    #[test]
    fn answer_sets_never_exceed_the_scale(raw in prop::collection::vec(0u8..=255, 0..30)) {
        let set = AnswerSet::from_answers(&raw);
        for n in 1..=raw.len() {
            prop_assert!(set.get(n) <= MAX_ANSWER);
        }
    }
}
