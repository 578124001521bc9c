//! Fireground demand.

use crate::params::HydraulicConstants;
use crate::state::DemandInput;

/// Total flow the attack lines and monitors call for (gpm).
///
/// ```text
/// demand = n15·100 + n25·200 + robot_flow·robot_count
/// ```
pub fn total_demand(input: &DemandInput, c: &HydraulicConstants) -> f64 {
    input.n15 * c.nozzle_15_gpm
        + input.n25 * c.nozzle_25_gpm
        + input.robot_flow * input.robot_count
}
