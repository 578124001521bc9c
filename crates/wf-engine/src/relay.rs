//! Relay shuttle model: one truck class cycling between the water source and the
//! fireground.
//!
//! A cycle is a round trip, a fixed block of work (hook-up, discharge, turnaround) and
//! the time to fill the shuttle from the truck stationed at the source. Filling is a
//! two-phase drain:
//!
//! ```text
//! phase 1: shuttle fills at Qout while the source truck drains at Qout - Qintake
//! phase 2: source truck is empty, the rest of the shuttle fills at Qintake
//! ```
//!
//! Both the fill time and the per-class source status come from [`fill_outcome`].

use serde::Serialize;
use tracing::trace;
use wf_core::ratio_or_zero;
use wf_core::units::{km, kmph, round_trip_minutes};

use crate::params::HydraulicConstants;
use crate::state::{RelayConfig, TruckClass};

/// Everything about the source point that every shuttle class shares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaySite {
    pub distance_km: f64,
    pub lines: f64,
    pub pressure_kgf_cm2: f64,
    pub work_min: f64,
    pub source_tons: f64,
    /// Intake after the rear reduction (gpm)
    pub intake_eff: f64,
    pub rear_factor: f64,
}

impl RelaySite {
    pub fn new(cfg: &RelayConfig, intake_eff: f64, rear_factor: f64) -> Self {
        Self {
            distance_km: cfg.distance_km,
            lines: cfg.lines,
            pressure_kgf_cm2: cfg.pressure_kgf_cm2,
            work_min: cfg.work_min,
            source_tons: cfg.source_tons,
            intake_eff,
            rear_factor,
        }
    }

    /// Both a pressure and at least one line are set.
    pub fn has_line_config(&self) -> bool {
        self.pressure_kgf_cm2 > 0.0 && self.lines > 0.0
    }

    /// Flow available to fill a shuttle, all lines together (gpm).
    pub fn outflow_gpm(&self, c: &HydraulicConstants) -> f64 {
        self.lines * c.line_flow_gpm(self.pressure_kgf_cm2) * self.rear_factor
    }
}

/// How filling one shuttle plays out.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillOutcome {
    /// No pressure or no supply line set.
    NoLineConfig,
    /// Lines are set but the reduced outflow is zero.
    NoLineFlow,
    /// Intake keeps pace with the outflow; the source truck never drains.
    Replenished { minutes: f64 },
    /// The source truck is still holding water when the shuttle is full.
    HoldsOut { minutes: f64 },
    /// The source truck runs dry and nothing refills it.
    Stalled { drained_after: f64 },
    /// The source truck runs dry; the remainder fills at the intake rate.
    Refilling { drained_after: f64, minutes: f64 },
}

impl FillOutcome {
    /// Minutes to fill the shuttle. Infinite when it never fills.
    ///
    /// `NoLineConfig` reports zero: the cycle is rejected before any fill is attempted.
    pub fn fill_minutes(&self) -> f64 {
        match *self {
            FillOutcome::NoLineConfig => 0.0,
            FillOutcome::NoLineFlow | FillOutcome::Stalled { .. } => f64::INFINITY,
            FillOutcome::Replenished { minutes }
            | FillOutcome::HoldsOut { minutes }
            | FillOutcome::Refilling { minutes, .. } => minutes,
        }
    }

    /// The shuttle leaves full.
    pub fn completes(&self) -> bool {
        matches!(
            self,
            FillOutcome::Replenished { .. }
                | FillOutcome::HoldsOut { .. }
                | FillOutcome::Refilling { .. }
        )
    }
}

/// Decide how a `truck_tons` shuttle fills at `site`.
pub fn fill_outcome(site: &RelaySite, truck_tons: f64, c: &HydraulicConstants) -> FillOutcome {
    if !site.has_line_config() {
        return FillOutcome::NoLineConfig;
    }

    let q_out = site.outflow_gpm(c);
    if q_out <= 0.0 {
        return FillOutcome::NoLineFlow;
    }

    let v_source = c.tons_to_gal(site.source_tons);
    let v_truck = c.tons_to_gal(truck_tons);
    let q_intake = site.intake_eff;

    let t_ideal = v_truck / q_out;
    let q_net = q_out - q_intake;
    if q_net <= 0.0 {
        return FillOutcome::Replenished { minutes: t_ideal };
    }

    let t_empty = v_source / q_net;
    if t_empty >= t_ideal {
        return FillOutcome::HoldsOut { minutes: t_ideal };
    }

    if q_intake <= 0.0 {
        return FillOutcome::Stalled {
            drained_after: t_empty,
        };
    }

    let remaining = v_truck - q_out * t_empty;
    FillOutcome::Refilling {
        drained_after: t_empty,
        minutes: t_empty + remaining / q_intake,
    }
}

/// Cycle and throughput of one shuttle class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ModuleResult {
    pub class: TruckClass,
    pub drive_min: f64,
    pub fill_min: f64,
    /// Infinite when the shuttle can never complete a cycle
    pub cycle_min: f64,
    /// Ideal throughput of one truck running alone (L/min)
    pub throughput_lpm: f64,
    /// Same, in gpm
    pub throughput_gpm: f64,
    pub fill: FillOutcome,
}

impl ModuleResult {
    fn idle(class: TruckClass, drive_min: f64, fill_min: f64, fill: FillOutcome) -> Self {
        Self {
            class,
            drive_min,
            fill_min,
            cycle_min: f64::INFINITY,
            throughput_lpm: 0.0,
            throughput_gpm: 0.0,
            fill,
        }
    }

    /// Completes cycles in finite time.
    pub fn is_cycling(&self) -> bool {
        self.cycle_min.is_finite() && self.cycle_min > 0.0
    }
}

/// Run the shuttle model for one class travelling at `speed_kmh`.
pub fn model(
    class: TruckClass,
    speed_kmh: f64,
    site: &RelaySite,
    c: &HydraulicConstants,
) -> ModuleResult {
    let fill = fill_outcome(site, class.tons(), c);
    if fill == FillOutcome::NoLineConfig {
        return ModuleResult::idle(class, 0.0, 0.0, fill);
    }

    let drive_min = round_trip_minutes(km(site.distance_km), kmph(speed_kmh));
    let fill_min = fill.fill_minutes();
    if !fill.completes() {
        return ModuleResult::idle(class, drive_min, fill_min, fill);
    }

    let cycle_min = drive_min + site.work_min + fill_min;
    let throughput_lpm = ratio_or_zero(c.tons_to_liters(class.tons()), cycle_min);
    let throughput_gpm = c.liters_to_gal(throughput_lpm);

    trace!(
        %class,
        drive_min,
        fill_min,
        cycle_min,
        throughput_gpm,
        "relay module"
    );

    ModuleResult {
        class,
        drive_min,
        fill_min,
        cycle_min,
        throughput_lpm,
        throughput_gpm,
        fill,
    }
}
