use wf_engine::HydraulicConstants;
use wf_project::{LATEST_VERSION, ProjectError, Scenario, load, load_json, load_yaml, save, save_yaml};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

fn engine_room_fire() -> Scenario {
    let mut s = Scenario::new("Engine room fire");
    s.description = "Two 2.5-inch lines, shuttle from the pier hydrant".to_string();
    s.state.demand.n25 = 2.0;
    s.state.sources.hydrant.count = 1.0;
    s.state.relay.distance_km = 2.5;
    s.state.fleet.t10 = 2.0;
    s.state.tanks.t12 = 1.0;
    s.state.reductions.front_pct = 10.0;
    s
}

#[test]
fn roundtrip_yaml_default_scenario() {
    let scenario = Scenario::new("Empty");
    let path = temp_path("wf_project_roundtrip_default.yaml");

    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_yaml_with_fleet() {
    let scenario = engine_room_fire();
    let path = temp_path("wf_project_roundtrip_fleet.yaml");

    save(&path, &scenario).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(scenario, loaded);
    assert_eq!(scenario.calculate(), loaded.calculate());
}

#[test]
fn roundtrip_json_with_constants() {
    let mut scenario = engine_room_fire();
    scenario.constants = Some(HydraulicConstants {
        hose_d_inch: 2.5,
        ..HydraulicConstants::default()
    });
    let path = temp_path("wf_project_roundtrip_constants.json");

    save(&path, &scenario).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn hand_written_yaml_uses_defaults() {
    let path = temp_path("wf_project_hand_written.yaml");
    std::fs::write(
        &path,
        "name: Warehouse\nstate:\n  demand:\n    n15: 4\n  fleet: { t2: 0, t4: 2, t10: 0, t12: 0 }\n",
    )
    .unwrap();

    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded.version, LATEST_VERSION);
    assert_eq!(loaded.state.demand.n15, 4.0);
    assert_eq!(loaded.state.demand.robot_flow, 250.0);
    assert_eq!(loaded.state.fleet.t4, 2.0);

    let r = loaded.calculate();
    assert_eq!(r.demand, 400.0);
    assert!(r.fleet.total_demand > 0.0);
}

#[test]
fn browser_snapshot_imports() {
    let path = temp_path("wf_project_browser_snapshot.json");
    std::fs::write(&path, r#"{"n15": 3, "hydrant": 1, "modN4": 1, "rearReducePct": 20}"#).unwrap();

    let loaded = load_json(&path).unwrap();
    assert_eq!(loaded.version, LATEST_VERSION);
    assert_eq!(loaded.state.demand.n15, 3.0);
    assert_eq!(loaded.state.fleet.t4, 1.0);
    assert!((loaded.calculate().sources.intake_eff - 240.0).abs() < 1e-9);
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let path = temp_path("wf_project_invalid.yaml");
    std::fs::write(&path, "name: Bad\nstate:\n  reductions:\n    front_pct: 150\n").unwrap();

    let err = load_yaml(&path).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn invalid_scenario_is_not_written() {
    let mut scenario = Scenario::new("Bad");
    scenario.state.tanks.t2 = -2.0;
    let path = temp_path("wf_project_not_written.yaml");
    let _ = std::fs::remove_file(&path);

    assert!(save_yaml(&path, &scenario).is_err());
    assert!(!path.exists());
}
