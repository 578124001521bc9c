//! Fleet aggregation and the weakest-link compression.
//!
//! Every active shuttle refills from the same source. The fleet can never move more
//! water than the source delivers, so each class's ideal throughput is scaled down by
//! one shared factor once the fleet would out-draw the intake.

use serde::Serialize;
use wf_core::ratio_or_zero;

use crate::params::HydraulicConstants;
use crate::relay::ModuleResult;
use crate::state::PerClass;

/// Per-truck throughput of one class (gpm).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassThroughput {
    /// Running alone, unconstrained by the source
    pub ideal_gpm: f64,
    /// After compression
    pub effective_gpm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FleetSummary {
    /// Aggregate ideal draw of all active shuttles (gpm)
    pub total_demand: f64,
    /// In [0, 1]
    pub compression: f64,
    /// What the fleet actually delivers (gpm)
    pub effective: f64,
    pub per_class: PerClass<ClassThroughput>,
    /// Average minutes between shuttle arrivals; zero when nothing cycles
    pub overall_interval_min: f64,
    /// Minutes the intake needs to refill the source truck; zero without intake
    pub source_fill_min: f64,
    /// Minutes per round the hydrant is shut waiting for the next shuttle
    pub hydrant_idle_min: f64,
}

/// Weakest-link factor bounding fleet output by the intake.
pub fn compression_factor(total_demand: f64, intake_eff: f64) -> f64 {
    if total_demand <= 0.0 || intake_eff <= 0.0 {
        return 0.0;
    }
    (intake_eff / total_demand).min(1.0)
}

/// Average interval between arrivals across all classes that complete cycles.
pub fn overall_interval(modules: &PerClass<ModuleResult>, fleet: &PerClass<f64>) -> f64 {
    let trips_per_min: f64 = modules
        .iter()
        .filter(|(class, m)| *fleet.get(*class) > 0.0 && m.is_cycling())
        .map(|(class, m)| fleet.get(class) / m.cycle_min)
        .sum();

    ratio_or_zero(1.0, trips_per_min)
}

/// Time the intake takes to refill a `source_tons` truck at the source point.
pub fn source_fill_minutes(source_tons: f64, intake_eff: f64, c: &HydraulicConstants) -> f64 {
    if intake_eff <= 0.0 || source_tons <= 0.0 {
        return 0.0;
    }
    c.tons_to_liters(source_tons) / (intake_eff * c.l_per_gal)
}

pub fn aggregate(
    modules: &PerClass<ModuleResult>,
    fleet: &PerClass<f64>,
    intake_eff: f64,
    source_tons: f64,
    c: &HydraulicConstants,
) -> FleetSummary {
    let total_demand: f64 = modules
        .iter()
        .map(|(class, m)| m.throughput_gpm * fleet.get(class))
        .sum();

    let compression = compression_factor(total_demand, intake_eff);

    let per_class = modules.map(|_, m| ClassThroughput {
        ideal_gpm: m.throughput_gpm,
        effective_gpm: m.throughput_gpm * compression,
    });

    let overall_interval_min = overall_interval(modules, fleet);
    let source_fill_min = source_fill_minutes(source_tons, intake_eff, c);

    FleetSummary {
        total_demand,
        compression,
        effective: total_demand * compression,
        per_class,
        overall_interval_min,
        source_fill_min,
        hydrant_idle_min: (overall_interval_min - source_fill_min).max(0.0),
    }
}
