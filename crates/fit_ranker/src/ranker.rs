use std::collections::BTreeMap;

use drain_adjuster::{AspirationConfig, adjust_surface};
use drive_model::Drive;
use instrumentation_router::{GapRouteBuilder, InstrumentationRouter, RouteBuilder, RouteSet};
use log::debug;
use mismatch::{WeightMode, compute_mismatch_from_effective_surface};

use crate::catalog::OccupationSubtype;
use crate::config::{EngineConfig, RankingConfig};
use crate::profile::UserProfile;
use crate::result::{FitResult, RankedFits};
use crate::sort::{SortMode, sort_fit_results};

pub const CUSTOM_MAJOR: &str = "Custom";

/// Scores a user against occupation subtypes.
#[derive(Clone, Debug)]
pub struct FitRanker<B: RouteBuilder = GapRouteBuilder> {
    router: InstrumentationRouter<B>,
    aspiration: AspirationConfig,
    ranking: RankingConfig,
}

impl Default for FitRanker {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl FitRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_builder(GapRouteBuilder::new(config.routing), config)
    }
}

impl<B: RouteBuilder> FitRanker<B> {
    /// Routing policy fields of `config` are ignored; `builder` decides routes.
    pub fn with_builder(builder: B, config: &EngineConfig) -> Self {
        Self {
            router: InstrumentationRouter::with_builder(builder, config.satisfaction),
            aspiration: config.aspiration,
            ranking: config.ranking,
        }
    }

    pub fn router(&self) -> &InstrumentationRouter<B> {
        &self.router
    }

    pub fn routes(&self, user: &UserProfile) -> RouteSet {
        self.router.routes(
            &user.innate,
            &user.surface,
            &user.imposed,
            &user.satisfaction_inputs,
        )
    }

    /// Pass `routes` to reuse a set computed for the same user.
    pub fn simulate_profession_fit(
        &self,
        user: &UserProfile,
        subtype: &OccupationSubtype,
        routes: Option<&RouteSet>,
    ) -> FitResult {
        let routes = match routes {
            Some(r) => r.clone(),
            None => self.routes(user),
        };
        let adjustment = adjust_surface(&user.surface, &user.innate, &routes, &self.aspiration);
        let mismatch_raw = compute_mismatch_from_effective_surface(
            &adjustment.adjusted,
            &subtype.drives,
            WeightMode::ProfDemand,
        );
        let mismatch_adjusted = compute_mismatch_from_effective_surface(
            &adjustment.aspired,
            &subtype.drives,
            WeightMode::MixedMax,
        );
        FitResult {
            major: subtype.major.clone(),
            name: subtype.name.clone(),
            innate_avg: user.innate,
            surface_avg: user.surface,
            imposed_avg: user.imposed,
            prof_demand: subtype.drives,
            routes,
            surface_drain: adjustment.drain,
            surface_transfer: adjustment.transfer,
            surface_adjusted: adjustment.adjusted,
            surface_adjusted_aspired: adjustment.aspired,
            total_mismatch_raw: mismatch_raw.total_deficit,
            total_mismatch_adjusted: mismatch_adjusted.total_deficit,
            total_drained_energy: adjustment.total_drained_energy,
            mismatch_raw,
            mismatch_adjusted,
        }
    }

    pub fn rank_profession_subtypes(
        &self,
        user: &UserProfile,
        subtypes: &[OccupationSubtype],
    ) -> RankedFits {
        let routes = self.routes(user);
        let mut results: Vec<FitResult> = subtypes
            .iter()
            .map(|s| self.simulate_profession_fit(user, s, Some(&routes)))
            .collect();
        sort_fit_results(&mut results, SortMode::Mismatch);
        if let Some(best) = results.first() {
            debug!(
                "ranked {} subtypes; best {:?} at {:.3}",
                results.len(),
                best.name,
                best.total_mismatch_adjusted
            );
        }
        RankedFits::from_sorted(results, self.ranking.slice_len)
    }

    /// Absent drives demand 0; the major defaults to `CUSTOM_MAJOR`.
    pub fn simulate_custom_job_fit(
        &self,
        user: &UserProfile,
        job_name: &str,
        demand: &BTreeMap<Drive, f64>,
        major: Option<&str>,
    ) -> FitResult {
        let subtype =
            OccupationSubtype::from_partial(major.unwrap_or(CUSTOM_MAJOR), job_name, demand);
        self.simulate_profession_fit(user, &subtype, None)
    }
}
