use drive_model::{Drive, DriveVector};
use mismatch::{WeightMode, compute_mismatch_from_effective_surface};
use proptest::prelude::*;

fn drive_vector() -> impl Strategy<Value = DriveVector> {
    prop::array::uniform7(0.0f64..=5.0).prop_map(|values| {
        Drive::ALL.into_iter().zip(values).collect::<DriveVector>()
    })
}

proptest! {
    #[test]
    fn deficits_are_non_negative_and_mixed_max_dominates(
        surface in drive_vector(),
        demand in drive_vector(),
    ) {
        let raw = compute_mismatch_from_effective_surface(&surface, &demand, WeightMode::ProfDemand);
        let mixed = compute_mismatch_from_effective_surface(&surface, &demand, WeightMode::MixedMax);
        for drive in Drive::ALL {
            prop_assert!(raw.mismatch[drive] >= 0.0);
            prop_assert!(mixed.mismatch[drive] >= raw.mismatch[drive]);
        }
        prop_assert!(mixed.total_deficit >= raw.total_deficit);
    }

    #[test]
    fn meeting_demand_everywhere_costs_nothing(demand in drive_vector()) {
        let m = compute_mismatch_from_effective_surface(&demand, &demand, WeightMode::MixedMax);
        prop_assert_eq!(m.total_deficit, 0.0);
    }
}
