use drive_model::{DRIVE_CEILING, Drive, DriveVector, clamp, clamp01};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::route::{InstrumentRoute, RouteKind, RouteSet};

/// Everything a route policy may look at for one user.
#[derive(Clone, Copy, Debug)]
pub struct RouteInputs<'a> {
    pub innate: &'a DriveVector,
    pub surface: &'a DriveVector,
    pub imposed: &'a DriveVector,
    pub satisfaction: &'a DriveVector,
}

/// Replaceable rule deciding which drives feed which. Implementations must be
/// deterministic: identical inputs give an identical `RouteSet`.
pub trait RouteBuilder: Send + Sync {
    fn build_routes(&self, inputs: &RouteInputs<'_>) -> RouteSet;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePolicy {
    /// Minimum innate/imposed gap before a drive counts as suppressed or rewarded.
    pub min_gap: f64,
    pub max_targets_per_source: usize,
    pub base_loss: f64,
    /// Extra loss when the target is weakly expressed on the surface.
    pub loss_slope: f64,
    pub suppression_loss_penalty: f64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            min_gap: 0.5,
            max_targets_per_source: 2,
            base_loss: 0.2,
            loss_slope: 0.5,
            suppression_loss_penalty: 0.1,
        }
    }
}

/// Default policy: a drive the environment under-rewards relative to its
/// innate strength diverts into the drives the environment over-rewards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GapRouteBuilder {
    pub policy: RoutePolicy,
}

impl GapRouteBuilder {
    pub fn new(policy: RoutePolicy) -> Self {
        Self { policy }
    }

    fn loss_ratio(&self, target_surface: f64, kind: RouteKind) -> f64 {
        let p = &self.policy;
        let weak_target = (DRIVE_CEILING - clamp(target_surface, 0.0, DRIVE_CEILING)) / DRIVE_CEILING;
        let penalty = match kind {
            RouteKind::Suppression => p.suppression_loss_penalty,
            RouteKind::Prioritization => 0.0,
        };
        clamp01(p.base_loss + p.loss_slope * weak_target + penalty)
    }

    fn targets_for(&self, source: Drive, inputs: &RouteInputs<'_>) -> Vec<(Drive, f64)> {
        let mut targets = Drive::ALL
            .into_iter()
            .filter(|t| *t != source)
            .map(|t| (t, (inputs.imposed[t] - inputs.innate[t]).max(0.0)))
            .filter(|(_, rewarded)| *rewarded > 0.0 && *rewarded >= self.policy.min_gap)
            .collect::<Vec<_>>();
        targets.sort_by(|l, r| r.1.total_cmp(&l.1).then_with(|| l.0.cmp(&r.0)));
        targets.truncate(self.policy.max_targets_per_source);
        targets
    }
}

impl RouteBuilder for GapRouteBuilder {
    fn build_routes(&self, inputs: &RouteInputs<'_>) -> RouteSet {
        let mut routes = Vec::new();
        for source in Drive::ALL {
            let innate = inputs.innate[source];
            let suppressed = (innate - inputs.imposed[source]).max(0.0);
            if innate <= 0.0 || suppressed <= 0.0 || suppressed < self.policy.min_gap {
                continue;
            }

            let targets = self.targets_for(source, inputs);
            let rewarded_total = targets.iter().map(|(_, r)| r).sum::<f64>();
            if rewarded_total <= 0.0 {
                continue;
            }

            let kind = RouteKind::from_satisfaction(inputs.satisfaction[source]);
            let diverted = clamp01(suppressed / innate);
            for (target, rewarded) in targets {
                let share = rewarded / rewarded_total;
                let loss = self.loss_ratio(inputs.surface[target], kind);
                let route = InstrumentRoute::new(source, target, kind, diverted * share, loss, innate);
                trace!(
                    "route {source} -> {target}: diversion={:.3} loss={:.3} drain={:.3}",
                    route.diversion_ratio,
                    route.loss_ratio,
                    route.path_drain
                );
                routes.push(route);
            }
        }
        RouteSet::from_routes(routes)
    }
}
