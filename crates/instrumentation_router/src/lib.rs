//! Instrumentation routes: how energy from a drive the environment does not
//! reward is redirected into drives it does reward, and at what loss.

mod policy;
mod route;
mod satisfaction;

use drive_model::DriveVector;
use instrument_scoring::SatisfactionInputs;
use log::debug;

pub use policy::{GapRouteBuilder, RouteBuilder, RouteInputs, RoutePolicy};
pub use route::{InstrumentRoute, RouteKind, RouteSet};
pub use satisfaction::{
    SUPPRESSION_THRESHOLD, SatisfactionBand, SatisfactionWeights, satisfaction, satisfaction_score,
};

/// Computes a user's route set with a pluggable `RouteBuilder`.
#[derive(Clone, Debug)]
pub struct InstrumentationRouter<B: RouteBuilder = GapRouteBuilder> {
    builder: B,
    satisfaction_weights: SatisfactionWeights,
}

impl Default for InstrumentationRouter {
    fn default() -> Self {
        Self::new(RoutePolicy::default(), SatisfactionWeights::default())
    }
}

impl InstrumentationRouter {
    pub fn new(policy: RoutePolicy, satisfaction_weights: SatisfactionWeights) -> Self {
        Self::with_builder(GapRouteBuilder::new(policy), satisfaction_weights)
    }
}

impl<B: RouteBuilder> InstrumentationRouter<B> {
    pub fn with_builder(builder: B, satisfaction_weights: SatisfactionWeights) -> Self {
        Self {
            builder,
            satisfaction_weights,
        }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn satisfaction(&self, inputs: &SatisfactionInputs) -> DriveVector {
        satisfaction(inputs, self.satisfaction_weights)
    }

    pub fn routes(
        &self,
        innate: &DriveVector,
        surface: &DriveVector,
        imposed: &DriveVector,
        satisfaction_inputs: &SatisfactionInputs,
    ) -> RouteSet {
        let satisfaction = self.satisfaction(satisfaction_inputs);
        let routes = self.builder.build_routes(&RouteInputs {
            innate,
            surface,
            imposed,
            satisfaction: &satisfaction,
        });
        debug!(
            "built {} instrumentation routes (path drain {:.3})",
            routes.len(),
            routes.total_path_drain()
        );
        routes
    }
}

#[cfg(test)]
mod tests {
    use drive_model::{AnswerSet, Drive, DriveVector};
    use instrument_scoring::{SatisfactionInput, SatisfactionInputs};

    use crate::{
        InstrumentRoute, InstrumentationRouter, RouteBuilder, RouteInputs, RouteKind, RouteSet,
        SatisfactionWeights,
    };

    struct AlwaysIntoValue;

    impl RouteBuilder for AlwaysIntoValue {
        fn build_routes(&self, inputs: &RouteInputs<'_>) -> RouteSet {
            RouteSet::from_routes([InstrumentRoute::new(
                Drive::Care,
                Drive::Value,
                RouteKind::from_satisfaction(inputs.satisfaction[Drive::Care]),
                0.5,
                0.5,
                inputs.innate[Drive::Care],
            )])
        }
    }

    #[test]
    fn custom_builder_receives_computed_satisfaction() {
        let router = InstrumentationRouter::with_builder(AlwaysIntoValue, SatisfactionWeights::default());
        let mut inputs = SatisfactionInputs::from_imposed(&AnswerSet::new());
        inputs.set(
            Drive::Care,
            SatisfactionInput {
                env: 5.0,
                competence: 1.0,
                self_interest: 1.0,
            },
        );
        let innate = DriveVector::splat(2.0);
        let routes = router.routes(&innate, &innate, &innate, &inputs);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes.as_slice()[0].kind, RouteKind::Suppression);
        assert_eq!(routes.as_slice()[0].path_drain, 0.5);
    }

    #[test]
    fn default_router_labels_routes_from_imposed_answers() {
        let router: InstrumentationRouter = InstrumentationRouter::default();
        let innate = DriveVector::splat(2.0).with(Drive::Pleasure, 4.0);
        let imposed = DriveVector::splat(2.0)
            .with(Drive::Pleasure, 1.0)
            .with(Drive::Affiliation, 4.0);
        // pleasure triplet (q10..q12): env 5, competence 1, interest 2
        let mut answers = AnswerSet::new();
        answers.insert(10, 5);
        answers.insert(11, 1);
        answers.insert(12, 2);
        let inputs = SatisfactionInputs::from_imposed(&answers);

        let routes = router.routes(&innate, &innate, &imposed, &inputs);
        let r = routes.as_slice()[0];
        assert_eq!((r.source, r.target), (Drive::Pleasure, Drive::Affiliation));
        assert_eq!(r.kind, RouteKind::Suppression);
    }
}
