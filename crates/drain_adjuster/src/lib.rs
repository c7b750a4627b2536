//! Applies a user's instrumentation routes to their surface vector.
//!
//! Drain is weighted by the source drive's normalized innate strength here and
//! only here: drains matter more for drives the user cares about intrinsically.

use drive_model::{DRIVE_CEILING, Drive, DriveVector, clamp};
use instrumentation_router::RouteSet;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspirationConfig {
    /// Fraction of a value-linked route's effective transfer that is re-applied
    /// as aspiration.
    pub gain: f64,
    pub value_drive: Drive,
}

impl Default for AspirationConfig {
    fn default() -> Self {
        Self {
            gain: 0.5,
            value_drive: Drive::Value,
        }
    }
}

fn innate_weight(innate: &DriveVector, drive: Drive) -> f64 {
    clamp(innate[drive], 0.0, DRIVE_CEILING) / DRIVE_CEILING
}

pub fn surface_drain(innate: &DriveVector, routes: &RouteSet) -> DriveVector {
    let mut drain = DriveVector::zero();
    for r in routes {
        drain[r.source] += clamp(r.path_drain, 0.0, DRIVE_CEILING) * innate_weight(innate, r.source);
    }
    drain
}

pub fn surface_transfer(innate: &DriveVector, routes: &RouteSet) -> DriveVector {
    let mut transfer = DriveVector::zero();
    for r in routes {
        let arriving = clamp(innate[r.source] * r.effective_transfer, 0.0, DRIVE_CEILING);
        transfer[r.target] += arriving * innate_weight(innate, r.source);
    }
    transfer
}

pub fn total_drained_energy(drain: &DriveVector) -> f64 {
    drain.sum()
}

/// Drain only ever lowers expression, so only the floor is clamped.
pub fn surface_adjusted(surface: &DriveVector, drain: &DriveVector) -> DriveVector {
    surface.zip_map(drain, |s, d| (s - d).max(0.0))
}

/// Second pass for routes touching the value drive. Amounts are taken from
/// the drain-adjusted base so route order does not matter; drives no such
/// route touches are returned unchanged.
pub fn surface_adjusted_aspired(
    adjusted: &DriveVector,
    routes: &RouteSet,
    config: &AspirationConfig,
) -> DriveVector {
    let mut aspired = *adjusted;
    let mut touched = [false; Drive::COUNT];
    for r in routes.touching(config.value_drive) {
        let amount = config.gain * r.effective_transfer * adjusted[r.source];
        aspired[r.target] += amount;
        touched[r.source.index()] = true;
        touched[r.target.index()] = true;
    }
    for drive in Drive::ALL {
        if touched[drive.index()] {
            aspired[drive] = clamp(aspired[drive], 0.0, DRIVE_CEILING);
        }
    }
    aspired
}

/// All adjuster outputs for one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAdjustment {
    pub drain: DriveVector,
    pub transfer: DriveVector,
    pub adjusted: DriveVector,
    pub aspired: DriveVector,
    pub total_drained_energy: f64,
}

pub fn adjust_surface(
    surface: &DriveVector,
    innate: &DriveVector,
    routes: &RouteSet,
    config: &AspirationConfig,
) -> SurfaceAdjustment {
    let drain = surface_drain(innate, routes);
    let transfer = surface_transfer(innate, routes);
    let adjusted = surface_adjusted(surface, &drain);
    let aspired = surface_adjusted_aspired(&adjusted, routes, config);
    let total = total_drained_energy(&drain);
    debug!("surface drained by {total:.3} across {} routes", routes.len());
    SurfaceAdjustment {
        drain,
        transfer,
        adjusted,
        aspired,
        total_drained_energy: total,
    }
}
