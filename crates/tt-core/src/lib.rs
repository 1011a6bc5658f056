//! tt-core: shared foundation for tabthermo.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (species index)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TtError, TtResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
