//! Frontline supply and the intake available to the relay fleet.

use serde::Serialize;

use crate::state::{FrontlineSources, Reductions};

/// Source-side flows, before and after the loss reductions (gpm).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SourceSummary {
    pub frontline_nominal: f64,
    /// Frontline flow reaching the nozzles
    pub frontline: f64,
    pub intake_nominal: f64,
    /// Intake reaching the shuttles
    pub intake_eff: f64,
    pub front_factor: f64,
    pub rear_factor: f64,
}

pub fn summarize(
    sources: &FrontlineSources,
    source_flow: f64,
    reductions: &Reductions,
) -> SourceSummary {
    let front_factor = reductions.front_factor();
    let rear_factor = reductions.rear_factor();

    let frontline_nominal: f64 = sources.entries().iter().map(|e| e.flow()).sum();

    SourceSummary {
        frontline_nominal,
        frontline: frontline_nominal * front_factor,
        intake_nominal: source_flow,
        intake_eff: source_flow * rear_factor,
        front_factor,
        rear_factor,
    }
}
