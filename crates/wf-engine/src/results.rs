//! Output snapshot.

use serde::Serialize;

use crate::balance::Balance;
use crate::diagnostics::Diagnostics;
use crate::fleet::FleetSummary;
use crate::relay::ModuleResult;
use crate::sources::SourceSummary;
use crate::state::PerClass;

/// Operator-facing text for each diagnostic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Messages {
    pub bottleneck: String,
    pub hydrant_status: String,
    pub two_phase: String,
    pub source_truck: PerClass<String>,
}

impl Messages {
    pub fn from_diagnostics(d: &Diagnostics) -> Self {
        Self {
            bottleneck: d.bottleneck.to_string(),
            hydrant_status: d.utilization.to_string(),
            two_phase: d.two_phase.to_string(),
            source_truck: d.source_status.map(|_, s| s.to_string()),
        }
    }
}

/// Everything the engine derives from one [`WaterState`](crate::WaterState).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Results {
    /// Total demand (gpm)
    pub demand: f64,
    pub sources: SourceSummary,
    pub modules: PerClass<ModuleResult>,
    pub fleet: FleetSummary,
    pub balance: Balance,
    pub diagnostics: Diagnostics,
    pub messages: Messages,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKind {
    Frontline,
    Relay,
    Shortfall,
}

impl SliceKind {
    pub fn label(self) -> &'static str {
        match self {
            SliceKind::Frontline => "現場",
            SliceKind::Relay => "循環",
            SliceKind::Shortfall => "淨需求",
        }
    }
}

/// One rounded share of the demand picture, for charting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SupplySlice {
    pub kind: SliceKind,
    pub gpm: i64,
}

impl Results {
    pub fn frontline(&self) -> f64 {
        self.sources.frontline
    }

    /// Relay flow after compression.
    pub fn relay(&self) -> f64 {
        self.fleet.effective
    }

    pub fn supply(&self) -> f64 {
        self.balance.supply
    }

    pub fn net(&self) -> f64 {
        self.balance.net
    }

    pub fn coverage(&self) -> f64 {
        self.balance.coverage
    }

    pub fn compression(&self) -> f64 {
        self.fleet.compression
    }

    /// Frontline, relay and shortfall rounded to whole gpm, empty slices dropped.
    pub fn supply_breakdown(&self) -> Vec<SupplySlice> {
        [
            (SliceKind::Frontline, self.frontline()),
            (SliceKind::Relay, self.relay()),
            (SliceKind::Shortfall, self.net()),
        ]
        .into_iter()
        .map(|(kind, v)| SupplySlice {
            kind,
            gpm: v.round() as i64,
        })
        .filter(|s| s.gpm > 0)
        .collect()
    }
}
