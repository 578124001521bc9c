//! Schema migration framework.
//!
//! Version 0 is a scenario written without a `version` field. The browser form's flat
//! local-storage snapshot is read as version 0 as well, via [`LegacySnapshot`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use wf_engine::{PerClass, SourceEntry, WaterState};

use crate::ProjectError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    if scenario.name.trim().is_empty() {
        scenario.name = "Untitled".to_string();
    }
    scenario.version = 1;
    Ok(scenario)
}

/// Flat snapshot as persisted by the browser form, camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacySnapshot {
    pub n15: f64,
    pub n25: f64,
    pub robot_flow: f64,
    pub robot_count: f64,
    pub small_truck: f64,
    pub normal_truck: f64,
    pub reservoir_truck: f64,
    pub truck12: f64,
    pub hydrant: f64,
    pub hydrant_flow: f64,
    pub b_hydrant: f64,
    pub b_hydrant_flow: f64,
    pub small_pump: f64,
    pub small_pump_flow: f64,
    pub normal_pump: f64,
    pub normal_flow: f64,
    pub reservoir_pump: f64,
    pub reservoir_pump_flow: f64,
    pub portable_pump: f64,
    pub portable_pump_flow: f64,
    pub mod_dist: f64,
    pub mod_lines: f64,
    pub mod_p: f64,
    pub mod_work: f64,
    pub src_s: f64,
    pub src_qh: f64,
    pub v2: f64,
    pub v4: f64,
    pub v10: f64,
    pub v12: f64,
    pub mod_n2: f64,
    pub mod_n4: f64,
    pub mod_n10: f64,
    pub mod_n12: f64,
    pub front_reduce_pct: f64,
    pub rear_reduce_pct: f64,
}

impl Default for LegacySnapshot {
    fn default() -> Self {
        Self::from(&WaterState::default())
    }
}

impl From<&WaterState> for LegacySnapshot {
    fn from(s: &WaterState) -> Self {
        let src = &s.sources;
        Self {
            n15: s.demand.n15,
            n25: s.demand.n25,
            robot_flow: s.demand.robot_flow,
            robot_count: s.demand.robot_count,
            small_truck: s.tanks.t2,
            normal_truck: s.tanks.t4,
            reservoir_truck: s.tanks.t10,
            truck12: s.tanks.t12,
            hydrant: src.hydrant.count,
            hydrant_flow: src.hydrant.unit_flow,
            b_hydrant: src.building_hydrant.count,
            b_hydrant_flow: src.building_hydrant.unit_flow,
            small_pump: src.small_pump.count,
            small_pump_flow: src.small_pump.unit_flow,
            normal_pump: src.normal_pump.count,
            normal_flow: src.normal_pump.unit_flow,
            reservoir_pump: src.reservoir_pump.count,
            reservoir_pump_flow: src.reservoir_pump.unit_flow,
            portable_pump: src.portable_pump.count,
            portable_pump_flow: src.portable_pump.unit_flow,
            mod_dist: s.relay.distance_km,
            mod_lines: s.relay.lines,
            mod_p: s.relay.pressure_kgf_cm2,
            mod_work: s.relay.work_min,
            src_s: s.relay.source_tons,
            src_qh: s.relay.source_flow,
            v2: s.relay.speed_kmh.t2,
            v4: s.relay.speed_kmh.t4,
            v10: s.relay.speed_kmh.t10,
            v12: s.relay.speed_kmh.t12,
            mod_n2: s.fleet.t2,
            mod_n4: s.fleet.t4,
            mod_n10: s.fleet.t10,
            mod_n12: s.fleet.t12,
            front_reduce_pct: s.reductions.front_pct,
            rear_reduce_pct: s.reductions.rear_pct,
        }
    }
}

impl From<LegacySnapshot> for WaterState {
    fn from(l: LegacySnapshot) -> Self {
        let entry = |count, unit_flow| SourceEntry { count, unit_flow };
        let mut s = WaterState::default();

        s.demand.n15 = l.n15;
        s.demand.n25 = l.n25;
        s.demand.robot_flow = l.robot_flow;
        s.demand.robot_count = l.robot_count;

        s.tanks = PerClass {
            t2: l.small_truck,
            t4: l.normal_truck,
            t10: l.reservoir_truck,
            t12: l.truck12,
        };

        s.sources.hydrant = entry(l.hydrant, l.hydrant_flow);
        s.sources.building_hydrant = entry(l.b_hydrant, l.b_hydrant_flow);
        s.sources.small_pump = entry(l.small_pump, l.small_pump_flow);
        s.sources.normal_pump = entry(l.normal_pump, l.normal_flow);
        s.sources.reservoir_pump = entry(l.reservoir_pump, l.reservoir_pump_flow);
        s.sources.portable_pump = entry(l.portable_pump, l.portable_pump_flow);

        s.relay.distance_km = l.mod_dist;
        s.relay.lines = l.mod_lines;
        s.relay.pressure_kgf_cm2 = l.mod_p;
        s.relay.work_min = l.mod_work;
        s.relay.source_tons = l.src_s;
        s.relay.source_flow = l.src_qh;
        s.relay.speed_kmh = PerClass {
            t2: l.v2,
            t4: l.v4,
            t10: l.v10,
            t12: l.v12,
        };

        s.fleet = PerClass {
            t2: l.mod_n2,
            t4: l.mod_n4,
            t10: l.mod_n10,
            t12: l.mod_n12,
        };

        s.reductions.front_pct = l.front_reduce_pct;
        s.reductions.rear_pct = l.rear_reduce_pct;
        s
    }
}

const LEGACY_MARKERS: [&str; 3] = ["n15", "modDist", "srcQh"];

fn is_legacy(value: &serde_json::Value) -> bool {
    match value.as_object() {
        Some(map) => {
            !map.contains_key("state") && LEGACY_MARKERS.iter().any(|k| map.contains_key(*k))
        }
        None => false,
    }
}

/// Read either a scenario document or a flat browser snapshot.
pub fn scenario_from_json_value(value: serde_json::Value) -> Result<Scenario, ProjectError> {
    if is_legacy(&value) {
        debug!("reading flat browser snapshot");
        let legacy: LegacySnapshot = serde_json::from_value(value)?;
        return Ok(Scenario {
            version: 0,
            name: "Imported snapshot".to_string(),
            description: String::new(),
            state: legacy.into(),
            constants: None,
        });
    }
    Ok(serde_json::from_value(value)?)
}
