//! wf-engine: water-balance and relay-cycle calculation engine.
//!
//! Turns one operator snapshot ([`WaterState`]) into a full set of results
//! ([`Results`]):
//! - demand from handlines and monitors
//! - frontline supply and the intake left for the relay fleet
//! - per-class shuttle cycle time and throughput, with two-phase source drain
//! - weakest-link compression of the fleet by the intake
//! - shortfall, coverage and reserve tank endurance
//! - categorical diagnostics and the plain-text report
//!
//! Every call recomputes everything; nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use wf_engine::{WaterState, calculate, report};
//!
//! let mut state = WaterState::default();
//! state.demand.n15 = 2.0;
//! state.sources.hydrant.count = 1.0;
//!
//! let results = calculate(&state);
//! assert_eq!(results.net(), 0.0);
//! println!("{}", report::render(&results));
//! ```

pub mod balance;
pub mod demand;
pub mod diagnostics;
pub mod engine;
pub mod fleet;
pub mod params;
pub mod relay;
pub mod report;
pub mod results;
pub mod sources;
pub mod state;

// Re-exports
pub use balance::{Balance, Endurance};
pub use diagnostics::{Bottleneck, Diagnostics, SourceStatus, TwoPhase, UtilizationBand};
pub use engine::{calculate, calculate_with};
pub use fleet::{ClassThroughput, FleetSummary};
pub use params::HydraulicConstants;
pub use relay::{FillOutcome, ModuleResult, RelaySite};
pub use results::{Messages, Results, SliceKind, SupplySlice};
pub use sources::SourceSummary;
pub use state::{
    DemandInput, FrontlineSources, PerClass, RelayConfig, Reductions, SourceEntry, TruckClass,
    WaterState,
};
