//! Categorical reading of the numeric results.
//!
//! Each classifier is a small stateless decision table over values the engine has
//! already computed. `Display` renders the operator-facing text.

use std::fmt;

use serde::Serialize;

use crate::fleet::FleetSummary;
use crate::params::HydraulicConstants;
use crate::relay::{FillOutcome, ModuleResult};
use crate::report::fixed;
use crate::state::PerClass;

/// Which side limits the relay operation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bottleneck {
    NoFleet,
    /// The rear reduction leaves no intake at all.
    IntakeZero,
    /// The source has headroom; the fleet uses `share_pct` of it.
    FleetLimited { share_pct: f64 },
    /// The source caps the fleet at `efficiency_pct` of its ideal throughput.
    SourceLimited { efficiency_pct: f64 },
}

impl Bottleneck {
    pub fn classify(total_demand: f64, intake_eff: f64, compression: f64) -> Self {
        if total_demand <= 0.0 {
            return Bottleneck::NoFleet;
        }
        if intake_eff <= 0.0 {
            return Bottleneck::IntakeZero;
        }
        if compression >= 1.0 {
            Bottleneck::FleetLimited {
                share_pct: total_demand / intake_eff * 100.0,
            }
        } else {
            Bottleneck::SourceLimited {
                efficiency_pct: compression * 100.0,
            }
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(
            self,
            Bottleneck::IntakeZero | Bottleneck::SourceLimited { .. }
        )
    }
}

impl fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottleneck::NoFleet => f.write_str("水源與車隊尚未計算"),
            Bottleneck::IntakeZero => f.write_str("折減後取水為 0，水源為瓶頸"),
            Bottleneck::FleetLimited { share_pct } => {
                write!(f, "水源充足，車隊為限制 (車隊佔水源 {}%)", fixed(*share_pct, 0))
            }
            Bottleneck::SourceLimited { efficiency_pct } => {
                write!(f, "水源為瓶頸 (車隊僅發揮 {}% 效能)", fixed(*efficiency_pct, 0))
            }
        }
    }
}

/// Fleet draw as a fraction of the effective intake; zero unless both are positive.
pub fn utilization_fraction(total_demand: f64, intake_eff: f64) -> f64 {
    if intake_eff > 0.0 && total_demand > 0.0 {
        total_demand / intake_eff
    } else {
        0.0
    }
}

/// How hard the fleet works the hydrant feeding the source truck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    NoFleet,
    CannotCompute,
    /// 120% and above
    Severe,
    /// 100% up to 120%
    Saturated,
    /// 70% up to 100%
    High,
    Headroom,
}

impl UtilizationBand {
    pub fn classify(total_demand: f64, intake_eff: f64) -> Self {
        if total_demand <= 0.0 {
            return UtilizationBand::NoFleet;
        }
        if intake_eff <= 0.0 {
            return UtilizationBand::CannotCompute;
        }
        let pct = utilization_fraction(total_demand, intake_eff) * 100.0;
        if pct >= 120.0 {
            UtilizationBand::Severe
        } else if pct >= 100.0 {
            UtilizationBand::Saturated
        } else if pct >= 70.0 {
            UtilizationBand::High
        } else {
            UtilizationBand::Headroom
        }
    }
}

impl fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UtilizationBand::NoFleet => "未投入車隊",
            UtilizationBand::CannotCompute => "無法計算 (取水為0)",
            UtilizationBand::Severe => {
                "嚴重不足 (>120%)：需求遠大於水源，請立即增加水源或減線！"
            }
            UtilizationBand::Saturated => "已成瓶頸 (100%)：水源極限，無法再加車",
            UtilizationBand::High => "利用率偏高 (70%+)：水源接近滿載",
            UtilizationBand::Headroom => "利用率中低 (有餘裕)：可繼續增加循環車輛",
        })
    }
}

/// Short-term vs long-term relay flow around the source truck running dry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TwoPhase {
    InsufficientData,
    /// The intake keeps up; the fleet holds `long_term` gpm indefinitely.
    Stable { long_term: f64 },
    /// `short_term` gpm until the source truck empties after `drain_min`, then `long_term`.
    Draining {
        short_term: f64,
        drain_min: f64,
        long_term: f64,
    },
}

impl TwoPhase {
    pub fn classify(
        total_demand: f64,
        intake_eff: f64,
        source_tons: f64,
        c: &HydraulicConstants,
    ) -> Self {
        if total_demand <= 0.0 || intake_eff <= 0.0 || source_tons <= 0.0 {
            return TwoPhase::InsufficientData;
        }

        let long_term = total_demand.min(intake_eff);
        let net_drain = total_demand - intake_eff;
        if net_drain <= 0.0 {
            return TwoPhase::Stable { long_term };
        }

        TwoPhase::Draining {
            short_term: total_demand,
            drain_min: c.tons_to_gal(source_tons) / net_drain,
            long_term,
        }
    }
}

impl fmt::Display for TwoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoPhase::InsufficientData => f.write_str("資料不足"),
            TwoPhase::Stable { long_term } => {
                write!(f, "供水穩定\n長期可維持 {} gpm", fixed(*long_term, 0))
            }
            TwoPhase::Draining {
                short_term,
                drain_min,
                long_term,
            } => {
                let drain = fixed(*drain_min, 0);
                write!(
                    f,
                    "短期 (約{drain}分內): 供水車有水，維持 {} gpm\n\
                     長期 (> {drain}分): 供水車抽乾，降至 {} gpm",
                    fixed(*short_term, 0),
                    fixed(*long_term, 0)
                )
            }
        }
    }
}

/// What happens to the source truck while one shuttle of a class fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    LineNotConfigured,
    NoLineFlow,
    NeverDrained,
    HoldsUntilFull,
    DrainsAndStalls,
    DrainsThenRefills,
}

impl From<&FillOutcome> for SourceStatus {
    fn from(outcome: &FillOutcome) -> Self {
        match outcome {
            FillOutcome::NoLineConfig => SourceStatus::LineNotConfigured,
            FillOutcome::NoLineFlow => SourceStatus::NoLineFlow,
            FillOutcome::Replenished { .. } => SourceStatus::NeverDrained,
            FillOutcome::HoldsOut { .. } => SourceStatus::HoldsUntilFull,
            FillOutcome::Stalled { .. } => SourceStatus::DrainsAndStalls,
            FillOutcome::Refilling { .. } => SourceStatus::DrainsThenRefills,
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceStatus::LineNotConfigured => "請設定供水線數與出水壓力",
            SourceStatus::NoLineFlow => "供水線流量為 0",
            SourceStatus::NeverDrained => "供水車不會被抽乾 (補水≥出水)",
            SourceStatus::HoldsUntilFull => "加滿循環車前不會抽乾",
            SourceStatus::DrainsAndStalls => "加滿前會被抽乾 (無法再補水)",
            SourceStatus::DrainsThenRefills => "加滿前會被抽乾 (依賴後段補水)",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostics {
    pub bottleneck: Bottleneck,
    pub utilization: UtilizationBand,
    pub utilization_frac: f64,
    pub two_phase: TwoPhase,
    pub source_status: PerClass<SourceStatus>,
}

pub fn diagnose(
    fleet: &FleetSummary,
    modules: &PerClass<ModuleResult>,
    intake_eff: f64,
    source_tons: f64,
    c: &HydraulicConstants,
) -> Diagnostics {
    Diagnostics {
        bottleneck: Bottleneck::classify(fleet.total_demand, intake_eff, fleet.compression),
        utilization: UtilizationBand::classify(fleet.total_demand, intake_eff),
        utilization_frac: utilization_fraction(fleet.total_demand, intake_eff),
        two_phase: TwoPhase::classify(fleet.total_demand, intake_eff, source_tons, c),
        source_status: modules.map(|_, m| SourceStatus::from(&m.fill)),
    }
}
