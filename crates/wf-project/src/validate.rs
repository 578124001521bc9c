//! Scenario validation logic.
//!
//! The engine computes with whatever it is handed. This is the boundary where a saved
//! scenario is rejected if it holds values the formulas were never meant to see.

use wf_core::{WfError, ensure_in_range, ensure_non_negative};
use wf_engine::{HydraulicConstants, PerClass, WaterState};

use crate::schema::Scenario;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

impl From<WfError> for ValidationError {
    fn from(e: WfError) -> Self {
        let (field, value, reason) = match e {
            WfError::NonFinite { what, value } => (what, value, "must be finite".to_string()),
            WfError::Negative { what, value } => (what, value, "must not be negative".to_string()),
            WfError::OutOfRange {
                what,
                value,
                min,
                max,
            } => (what, value, format!("must be within {min}..={max}")),
        };
        ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

type Check = Result<(), ValidationError>;

fn non_negative(v: f64, field: &'static str) -> Check {
    ensure_non_negative(v, field)?;
    Ok(())
}

fn positive(v: f64, field: &'static str) -> Check {
    non_negative(v, field)?;
    if v == 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: v.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

fn per_class(values: &PerClass<f64>, fields: [&'static str; 4]) -> Check {
    let [t2, t4, t10, t12] = fields;
    non_negative(values.t2, t2)?;
    non_negative(values.t4, t4)?;
    non_negative(values.t10, t10)?;
    non_negative(values.t12, t12)
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    validate_state(&scenario.state)?;
    if let Some(c) = &scenario.constants {
        validate_constants(c)?;
    }
    Ok(())
}

pub fn validate_state(s: &WaterState) -> Result<(), ValidationError> {
    let d = &s.demand;
    non_negative(d.n15, "demand.n15")?;
    non_negative(d.n25, "demand.n25")?;
    non_negative(d.robot_flow, "demand.robot_flow")?;
    non_negative(d.robot_count, "demand.robot_count")?;

    per_class(&s.tanks, ["tanks.t2", "tanks.t4", "tanks.t10", "tanks.t12"])?;

    let src = &s.sources;
    let entries = [
        (&src.hydrant, "sources.hydrant.count", "sources.hydrant.unit_flow"),
        (
            &src.building_hydrant,
            "sources.building_hydrant.count",
            "sources.building_hydrant.unit_flow",
        ),
        (&src.small_pump, "sources.small_pump.count", "sources.small_pump.unit_flow"),
        (&src.normal_pump, "sources.normal_pump.count", "sources.normal_pump.unit_flow"),
        (
            &src.reservoir_pump,
            "sources.reservoir_pump.count",
            "sources.reservoir_pump.unit_flow",
        ),
        (
            &src.portable_pump,
            "sources.portable_pump.count",
            "sources.portable_pump.unit_flow",
        ),
    ];
    for (entry, count_field, flow_field) in entries {
        non_negative(entry.count, count_field)?;
        non_negative(entry.unit_flow, flow_field)?;
    }

    let r = &s.relay;
    non_negative(r.distance_km, "relay.distance_km")?;
    non_negative(r.lines, "relay.lines")?;
    non_negative(r.pressure_kgf_cm2, "relay.pressure_kgf_cm2")?;
    non_negative(r.work_min, "relay.work_min")?;
    non_negative(r.source_tons, "relay.source_tons")?;
    non_negative(r.source_flow, "relay.source_flow")?;
    per_class(
        &r.speed_kmh,
        [
            "relay.speed_kmh.t2",
            "relay.speed_kmh.t4",
            "relay.speed_kmh.t10",
            "relay.speed_kmh.t12",
        ],
    )?;

    per_class(&s.fleet, ["fleet.t2", "fleet.t4", "fleet.t10", "fleet.t12"])?;

    ensure_in_range(s.reductions.front_pct, 0.0, 100.0, "reductions.front_pct")?;
    ensure_in_range(s.reductions.rear_pct, 0.0, 100.0, "reductions.rear_pct")?;
    Ok(())
}

pub fn validate_constants(c: &HydraulicConstants) -> Result<(), ValidationError> {
    positive(c.l_per_gal, "constants.l_per_gal")?;
    positive(c.gal_per_ton, "constants.gal_per_ton")?;
    positive(c.l_per_ton, "constants.l_per_ton")?;
    positive(c.psi_per_kgf_cm2, "constants.psi_per_kgf_cm2")?;
    positive(c.hose_d_inch, "constants.hose_d_inch")?;
    positive(c.discharge_coeff, "constants.discharge_coeff")?;
    non_negative(c.nozzle_15_gpm, "constants.nozzle_15_gpm")?;
    non_negative(c.nozzle_25_gpm, "constants.nozzle_25_gpm")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn default_scenario_is_valid() {
        assert_eq!(validate_scenario(&Scenario::new("ok")), Ok(()));
    }

    #[test]
    fn negative_fleet_count_is_rejected() {
        let mut s = Scenario::new("bad");
        s.state.fleet.t10 = -1.0;
        assert_eq!(field_of(validate_scenario(&s).unwrap_err()), "fleet.t10");
    }

    #[test]
    fn reduction_above_hundred_is_rejected() {
        let mut s = Scenario::new("bad");
        s.state.reductions.rear_pct = 120.0;
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("reductions.rear_pct"));
        assert!(err.to_string().contains("0..=100"));
    }

    #[test]
    fn non_finite_flow_is_rejected() {
        let mut s = Scenario::new("bad");
        s.state.sources.normal_pump.unit_flow = f64::NAN;
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "sources.normal_pump.unit_flow"
        );
    }

    #[test]
    fn zero_hose_diameter_is_rejected() {
        let mut s = Scenario::new("bad");
        s.constants = Some(HydraulicConstants {
            hose_d_inch: 0.0,
            ..HydraulicConstants::default()
        });
        assert_eq!(
            field_of(validate_scenario(&s).unwrap_err()),
            "constants.hose_d_inch"
        );
    }

    #[test]
    fn future_version_is_rejected() {
        let mut s = Scenario::new("future");
        s.version = crate::migrate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
