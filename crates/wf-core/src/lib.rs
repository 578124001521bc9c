//! wf-core: stable foundation for waterflow.
//!
//! Contains:
//! - units (uom types + constructors, fixed physical constants)
//! - numeric (Real + tolerances + guarded float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::WfError;
pub use numeric::*;
pub use units::*;
