//! Supply against demand, and how long the reserve tanks bridge the gap.

use serde::Serialize;
use wf_core::ratio_or_zero;

use crate::params::HydraulicConstants;
use crate::state::{PerClass, TruckClass};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Balance {
    /// Frontline plus effective relay flow (gpm)
    pub supply: f64,
    /// Shortfall, never negative (gpm)
    pub net: f64,
    pub total_tank_l: f64,
    pub total_tank_gal: f64,
    /// Minutes of tank water at the current shortfall. Zero when there is no shortfall
    /// or no tank water; see [`Balance::endurance`].
    pub duration_min: f64,
    /// Supply as a percentage of demand, capped at 100
    pub coverage: f64,
}

/// How long the reserve tanks last, as a caller should read `duration_min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endurance {
    /// Supply covers demand; the tanks are never drawn on.
    Sufficient,
    /// Tanks run out after this many minutes and seconds.
    Remaining { minutes: u64, seconds: u64 },
    /// Non-finite duration.
    Unknown,
}

impl Balance {
    pub fn is_sufficient(&self) -> bool {
        self.net <= 0.0
    }

    pub fn endurance(&self) -> Endurance {
        if self.is_sufficient() {
            return Endurance::Sufficient;
        }
        if !self.duration_min.is_finite() {
            return Endurance::Unknown;
        }
        // Round on the whole-second total so 59.6 s never shows up as "60 s".
        let total_seconds = (self.duration_min * 60.0).round() as u64;
        Endurance::Remaining {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
        }
    }
}

pub fn total_tank_liters(tanks: &PerClass<f64>, c: &HydraulicConstants) -> f64 {
    TruckClass::ALL
        .iter()
        .map(|&class| tanks.get(class) * class.capacity_liters(c))
        .sum()
}

pub fn evaluate(
    demand: f64,
    frontline: f64,
    relay_effective: f64,
    tanks: &PerClass<f64>,
    c: &HydraulicConstants,
) -> Balance {
    let supply = frontline + relay_effective;
    let net = (demand - supply).max(0.0);

    let total_tank_l = total_tank_liters(tanks, c);
    let total_tank_gal = c.liters_to_gal(total_tank_l);

    let duration_min = if net > 0.0 && total_tank_gal > 0.0 {
        total_tank_gal / net
    } else {
        0.0
    };

    let coverage = (ratio_or_zero(supply, demand) * 100.0).min(100.0);

    Balance {
        supply,
        net,
        total_tank_l,
        total_tank_gal,
        duration_min,
        coverage,
    }
}
