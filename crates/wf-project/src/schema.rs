//! Scenario schema definitions.

use serde::{Deserialize, Serialize};
use wf_engine::{HydraulicConstants, Results, WaterState};

/// A named, saved operator snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Missing in files written before versioning; read as 0 and migrated.
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub state: WaterState,
    /// Overrides for unit conventions; the fireground defaults when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<HydraulicConstants>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            description: String::new(),
            state: WaterState::default(),
            constants: None,
        }
    }

    /// Back to the initial form values, keeping name and constants.
    pub fn reset(&mut self) {
        self.state = WaterState::default();
    }

    pub fn constants(&self) -> HydraulicConstants {
        self.constants.unwrap_or_default()
    }

    pub fn calculate(&self) -> Results {
        wf_engine::calculate_with(&self.state, &self.constants())
    }
}
