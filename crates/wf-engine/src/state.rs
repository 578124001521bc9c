//! Input snapshot: everything the operator enters, in one plain struct.
//!
//! The engine reads these values as given. Range checks belong to whoever builds the
//! snapshot (see `wf-project`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::HydraulicConstants;

/// The four tank-truck sizes used both as reserve tanks and as relay shuttles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckClass {
    Ton2,
    Ton4,
    Ton10,
    Ton12,
}

impl TruckClass {
    pub const ALL: [TruckClass; 4] = [
        TruckClass::Ton2,
        TruckClass::Ton4,
        TruckClass::Ton10,
        TruckClass::Ton12,
    ];

    /// Tank size in metric tons of water.
    pub fn tons(self) -> f64 {
        match self {
            TruckClass::Ton2 => 2.0,
            TruckClass::Ton4 => 4.0,
            TruckClass::Ton10 => 10.0,
            TruckClass::Ton12 => 12.0,
        }
    }

    pub fn capacity_liters(self, c: &HydraulicConstants) -> f64 {
        c.tons_to_liters(self.tons())
    }
}

impl fmt::Display for TruckClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-ton", self.tons())
    }
}

/// One value per [`TruckClass`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerClass<T> {
    pub t2: T,
    pub t4: T,
    pub t10: T,
    pub t12: T,
}

impl<T> PerClass<T> {
    pub fn from_fn(mut f: impl FnMut(TruckClass) -> T) -> Self {
        Self {
            t2: f(TruckClass::Ton2),
            t4: f(TruckClass::Ton4),
            t10: f(TruckClass::Ton10),
            t12: f(TruckClass::Ton12),
        }
    }

    pub fn get(&self, class: TruckClass) -> &T {
        match class {
            TruckClass::Ton2 => &self.t2,
            TruckClass::Ton4 => &self.t4,
            TruckClass::Ton10 => &self.t10,
            TruckClass::Ton12 => &self.t12,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(TruckClass, &T) -> U) -> PerClass<U> {
        PerClass::from_fn(|c| f(c, self.get(c)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TruckClass, &T)> {
        TruckClass::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl<T: Copy> PerClass<T> {
    pub fn splat(v: T) -> Self {
        Self::from_fn(|_| v)
    }
}

/// Water needed on the fireground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandInput {
    /// 1.5-inch handlines
    pub n15: f64,
    /// 2.5-inch handlines
    pub n25: f64,
    /// Flow of one robotic monitor (gpm)
    pub robot_flow: f64,
    pub robot_count: f64,
}

impl Default for DemandInput {
    fn default() -> Self {
        Self {
            n15: 0.0,
            n25: 0.0,
            robot_flow: 250.0,
            robot_count: 0.0,
        }
    }
}

/// `count` identical sources each delivering `unit_flow` gpm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub count: f64,
    pub unit_flow: f64,
}

impl SourceEntry {
    pub const fn idle(unit_flow: f64) -> Self {
        Self {
            count: 0.0,
            unit_flow,
        }
    }

    pub fn flow(&self) -> f64 {
        self.count * self.unit_flow
    }
}

/// Sources that feed the fireground directly, without the relay fleet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontlineSources {
    pub hydrant: SourceEntry,
    pub building_hydrant: SourceEntry,
    pub small_pump: SourceEntry,
    pub normal_pump: SourceEntry,
    pub reservoir_pump: SourceEntry,
    pub portable_pump: SourceEntry,
}

impl Default for FrontlineSources {
    fn default() -> Self {
        Self {
            hydrant: SourceEntry::idle(300.0),
            building_hydrant: SourceEntry::idle(70.0),
            small_pump: SourceEntry::idle(317.0),
            normal_pump: SourceEntry::idle(661.0),
            reservoir_pump: SourceEntry::idle(847.0),
            portable_pump: SourceEntry::idle(132.0),
        }
    }
}

impl FrontlineSources {
    pub fn entries(&self) -> [&SourceEntry; 6] {
        [
            &self.hydrant,
            &self.building_hydrant,
            &self.small_pump,
            &self.normal_pump,
            &self.reservoir_pump,
            &self.portable_pump,
        ]
    }
}

/// Shuttle geometry and the water source the shuttles refill from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// One-way distance between source and fireground (km)
    pub distance_km: f64,
    /// Parallel supply lines filling a shuttle
    pub lines: f64,
    /// Supply line pressure (kgf/cm²)
    pub pressure_kgf_cm2: f64,
    /// Hook-up, discharge and turnaround per cycle (min)
    pub work_min: f64,
    /// Size of the truck stationed at the source (tons)
    pub source_tons: f64,
    /// Nominal flow feeding the source truck (gpm)
    pub source_flow: f64,
    /// Travel speed per shuttle class (km/h)
    pub speed_kmh: PerClass<f64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            distance_km: 0.5,
            lines: 2.0,
            pressure_kgf_cm2: 3.0,
            work_min: 5.0,
            source_tons: 10.0,
            source_flow: 300.0,
            speed_kmh: PerClass {
                t2: 60.0,
                t4: 50.0,
                t10: 40.0,
                t12: 40.0,
            },
        }
    }
}

/// Loss percentages, 0 to 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reductions {
    /// Between frontline sources and the nozzles
    pub front_pct: f64,
    /// Between the water source and the shuttle being filled
    pub rear_pct: f64,
}

impl Reductions {
    pub fn front_factor(&self) -> f64 {
        wf_core::reduction_factor(self.front_pct)
    }

    pub fn rear_factor(&self) -> f64 {
        wf_core::reduction_factor(self.rear_pct)
    }
}

/// Complete operator input. Every result is a pure function of one of these.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterState {
    pub demand: DemandInput,
    /// Reserve tank trucks on scene, by class
    pub tanks: PerClass<f64>,
    pub sources: FrontlineSources,
    pub relay: RelayConfig,
    /// Active shuttles, by class
    pub fleet: PerClass<f64>,
    pub reductions: Reductions,
}

impl WaterState {
    /// Everything zero, including unit flows and speeds.
    pub fn zeroed() -> Self {
        Self {
            demand: DemandInput {
                n15: 0.0,
                n25: 0.0,
                robot_flow: 0.0,
                robot_count: 0.0,
            },
            tanks: PerClass::splat(0.0),
            sources: FrontlineSources {
                hydrant: SourceEntry::idle(0.0),
                building_hydrant: SourceEntry::idle(0.0),
                small_pump: SourceEntry::idle(0.0),
                normal_pump: SourceEntry::idle(0.0),
                reservoir_pump: SourceEntry::idle(0.0),
                portable_pump: SourceEntry::idle(0.0),
            },
            relay: RelayConfig {
                distance_km: 0.0,
                lines: 0.0,
                pressure_kgf_cm2: 0.0,
                work_min: 0.0,
                source_tons: 0.0,
                source_flow: 0.0,
                speed_kmh: PerClass::splat(0.0),
            },
            fleet: PerClass::splat(0.0),
            reductions: Reductions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truck_capacities() {
        let c = HydraulicConstants::default();
        let caps: Vec<f64> = TruckClass::ALL
            .iter()
            .map(|t| t.capacity_liters(&c))
            .collect();
        assert_eq!(caps, vec![2000.0, 4000.0, 10000.0, 12000.0]);
    }

    #[test]
    fn per_class_lookup_and_map() {
        let speeds = RelayConfig::default().speed_kmh;
        assert_eq!(*speeds.get(TruckClass::Ton4), 50.0);
        let doubled = speeds.map(|_, v| v * 2.0);
        assert_eq!(doubled.t2, 120.0);
        let order: Vec<TruckClass> = speeds.iter().map(|(c, _)| c).collect();
        assert_eq!(order, TruckClass::ALL.to_vec());
    }

    #[test]
    fn defaults_match_initial_form() {
        let s = WaterState::default();
        assert_eq!(s.demand.robot_flow, 250.0);
        assert_eq!(s.sources.reservoir_pump.unit_flow, 847.0);
        assert_eq!(s.relay.source_flow, 300.0);
        assert_eq!(s.fleet, PerClass::splat(0.0));
        assert_eq!(s.reductions.front_factor(), 1.0);
    }

    #[test]
    fn partial_json_fills_from_defaults() {
        let s: WaterState =
            serde_json::from_str(r#"{"demand": {"n15": 2}, "fleet": {"t2": 1, "t4": 0, "t10": 0, "t12": 0}}"#)
                .unwrap();
        assert_eq!(s.demand.n15, 2.0);
        assert_eq!(s.demand.robot_flow, 250.0);
        assert_eq!(s.fleet.t2, 1.0);
        assert_eq!(s.relay.lines, 2.0);
    }

    #[test]
    fn display_truck_class() {
        assert_eq!(TruckClass::Ton10.to_string(), "10-ton");
    }
}
