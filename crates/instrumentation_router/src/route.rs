use drive_model::{Drive, clamp01};
use serde::{Deserialize, Serialize};

use crate::satisfaction::SUPPRESSION_THRESHOLD;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// The environment leaves the source drive unsatisfied.
    Suppression,
    /// The source drive is satisfied but deprioritized in favour of the target.
    Prioritization,
}

impl RouteKind {
    pub fn from_satisfaction(satisfaction: f64) -> Self {
        if satisfaction < SUPPRESSION_THRESHOLD {
            Self::Suppression
        } else {
            Self::Prioritization
        }
    }
}

/// A directed diversion of energy from `source` into `target`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRoute {
    pub source: Drive,
    pub target: Drive,
    pub kind: RouteKind,
    pub diversion_ratio: f64,
    pub loss_ratio: f64,
    pub effective_transfer: f64,
    pub path_drain: f64,
}

impl InstrumentRoute {
    /// Ratios are clamped to `[0, 1]`; `source_innate` is the innate magnitude
    /// of the source drive that the diverted share is taken from.
    pub fn new(
        source: Drive,
        target: Drive,
        kind: RouteKind,
        diversion_ratio: f64,
        loss_ratio: f64,
        source_innate: f64,
    ) -> Self {
        let diversion_ratio = clamp01(diversion_ratio);
        let loss_ratio = clamp01(loss_ratio);
        Self {
            source,
            target,
            kind,
            diversion_ratio,
            loss_ratio,
            effective_transfer: diversion_ratio * (1.0 - loss_ratio),
            path_drain: source_innate.max(0.0) * diversion_ratio * loss_ratio,
        }
    }

    pub fn touches(&self, drive: Drive) -> bool {
        self.source == drive || self.target == drive
    }
}

/// Routes ordered by `(source, target)`, at most one per ordered pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSet {
    routes: Vec<InstrumentRoute>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Self-loops are dropped; for a repeated pair the first route wins.
    pub fn from_routes(routes: impl IntoIterator<Item = InstrumentRoute>) -> Self {
        let mut routes = routes
            .into_iter()
            .filter(|r| r.source != r.target)
            .collect::<Vec<_>>();
        routes.sort_by_key(|r| (r.source, r.target));
        routes.dedup_by_key(|r| (r.source, r.target));
        Self { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn as_slice(&self) -> &[InstrumentRoute] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstrumentRoute> {
        self.routes.iter()
    }

    pub fn from_source(&self, drive: Drive) -> impl Iterator<Item = &InstrumentRoute> {
        self.routes.iter().filter(move |r| r.source == drive)
    }

    pub fn into_target(&self, drive: Drive) -> impl Iterator<Item = &InstrumentRoute> {
        self.routes.iter().filter(move |r| r.target == drive)
    }

    pub fn touching(&self, drive: Drive) -> impl Iterator<Item = &InstrumentRoute> {
        self.routes.iter().filter(move |r| r.touches(drive))
    }

    /// Unweighted sum of `path_drain`; the innate-weighted drain lives in the
    /// drain adjuster.
    pub fn total_path_drain(&self) -> f64 {
        self.routes.iter().map(|r| r.path_drain).sum()
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a InstrumentRoute;
    type IntoIter = std::slice::Iter<'a, InstrumentRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use drive_model::Drive;

    use crate::{InstrumentRoute, RouteKind, RouteSet};

    #[test]
    fn derived_fields_follow_ratios() {
        let r = InstrumentRoute::new(
            Drive::Exploration,
            Drive::Achievement,
            RouteKind::Suppression,
            0.75,
            0.5,
            4.0,
        );
        assert_eq!(r.effective_transfer, 0.375);
        assert_eq!(r.path_drain, 1.5);
    }

    #[test]
    fn ratios_are_clamped() {
        let r = InstrumentRoute::new(Drive::Care, Drive::Value, RouteKind::Prioritization, 1.4, -0.2, 2.0);
        assert_eq!(r.diversion_ratio, 1.0);
        assert_eq!(r.loss_ratio, 0.0);
        assert_eq!(r.effective_transfer, 1.0);
        assert_eq!(r.path_drain, 0.0);
    }

    #[test]
    fn kind_threshold_is_three() {
        assert_eq!(RouteKind::from_satisfaction(2.99), RouteKind::Suppression);
        assert_eq!(RouteKind::from_satisfaction(3.0), RouteKind::Prioritization);
    }

    #[test]
    fn set_is_ordered_and_deduplicated() {
        let mk = |s, t, d| InstrumentRoute::new(s, t, RouteKind::Prioritization, d, 0.1, 3.0);
        let set = RouteSet::from_routes([
            mk(Drive::Value, Drive::Care, 0.2),
            mk(Drive::Exploration, Drive::Care, 0.3),
            mk(Drive::Exploration, Drive::Care, 0.9),
            mk(Drive::Pleasure, Drive::Pleasure, 0.5),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[0].source, Drive::Exploration);
        assert_eq!(set.as_slice()[0].diversion_ratio, 0.3);
        assert_eq!(set.into_target(Drive::Care).count(), 2);
        assert_eq!(set.touching(Drive::Value).count(), 1);
        assert_eq!(set.from_source(Drive::Care).count(), 0);
    }

    #[test]
    fn serializes_as_plain_list() {
        let set = RouteSet::from_routes([InstrumentRoute::new(
            Drive::Dominance,
            Drive::Affiliation,
            RouteKind::Suppression,
            0.5,
            0.5,
            2.0,
        )]);
        let json = serde_json::to_value(&set).expect("ser");
        assert!(json.is_array());
        assert_eq!(json[0]["source"], "Dominance");
        assert_eq!(json[0]["kind"], "suppression");
    }
}
