//! tt-phase: constant-density ideal solution with one tabulated species.
//!
//! Provides:
//! - [`BasePhase`] / [`SettableState`]: the ideal-solution collaborator interface
//! - [`ConstDensityIdealSolution`]: constant-density base phase with constant-cp species
//! - [`ReferenceStateCache`]: memoized table evaluation keyed on composition
//! - [`TabulatedPhase`]: property adapter dispatching per species
//! - [`config`]: YAML/JSON phase documents
//!
//! # Example
//!
//! ```
//! use tt_core::SpeciesIndex;
//! use tt_core::units::kg_per_m3;
//! use tt_phase::{ConstDensityIdealSolution, Species, TabulatedPhase};
//! use tt_tables::TablePair;
//!
//! let base = ConstDensityIdealSolution::new(
//!     vec![Species::new("Li(C6)", 0.079), Species::new("V(C6)", 0.072)],
//!     kg_per_m3(2260.0),
//! )
//! .unwrap();
//! let tables = TablePair::from_points(
//!     vec![(0.0, 100.0), (0.5, 150.0), (1.0, 100.0)],
//!     vec![(0.0, 10.0), (0.5, 20.0), (1.0, 10.0)],
//! )
//! .unwrap();
//!
//! let mut phase = TabulatedPhase::new(base, SpeciesIndex::new(0), tables).unwrap();
//! phase.set_mole_fractions(&[0.5, 0.5]).unwrap();
//! assert_eq!(phase.reference_enthalpy(SpeciesIndex::new(0)).unwrap(), 150.0);
//! assert_eq!(phase.activity_coefficient(SpeciesIndex::new(1)).unwrap(), 1.0);
//! ```

pub mod base;
pub mod cache;
pub mod config;
pub mod error;
pub mod ideal;
pub mod phase;

pub use base::{BasePhase, SettableState};
pub use cache::{CacheState, ReferenceStateCache};
pub use config::{PhaseDef, SpeciesDef, TableSourceDef, TrackedSpeciesDef, validate_phase_def};
pub use error::{PhaseError, PhaseResult};
pub use ideal::{ConstDensityIdealSolution, Species};
pub use phase::{SpeciesThermo, TabulatedPhase};
