//! wf-project: scenario file format, migration and validation.

use std::fs;
use std::path::Path;

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, LegacySnapshot, migrate_to_latest, scenario_from_json_value};
pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Upgrade a freshly parsed scenario and check it before handing it out.
fn accept(scenario: Scenario) -> ProjectResult<Scenario> {
    let scenario = migrate_to_latest(scenario)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Scenario> {
    let content = fs::read_to_string(path)?;
    accept(serde_yaml::from_str(&content)?)
}

pub fn save_yaml(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    fs::write(path, serde_yaml::to_string(scenario)?)?;
    Ok(())
}

/// Load a scenario from JSON. Also accepts the flat snapshot the browser form kept in
/// local storage.
pub fn load_json(path: &Path) -> ProjectResult<Scenario> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    accept(scenario_from_json_value(value)?)
}

pub fn save_json(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    fs::write(path, serde_json::to_string_pretty(scenario)?)?;
    Ok(())
}

/// Pick the loader from the file extension (`.json`, otherwise YAML).
pub fn load(path: &Path) -> ProjectResult<Scenario> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

pub fn save(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    if is_json(path) {
        save_json(path, scenario)
    } else {
        save_yaml(path, scenario)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
