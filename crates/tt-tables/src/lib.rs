//! tt-tables: composition tables and piecewise-linear interpolation.
//!
//! Provides:
//! - [`Table`]: validated, immutable `(x, y)` table over mole fraction `x ∈ [0, 1]`
//! - [`TablePair`]: the enthalpy/entropy pair evaluated together
//! - [`interpolate`]: clamp-at-boundary piecewise-linear interpolation
//! - Loaders for delimited text and YAML/JSON table documents
//!
//! Loading is parse-then-validate: every loader ends in [`Table::new`], so the
//! interpolation core never sees an unvalidated table.
//!
//! # Example
//!
//! ```
//! use tt_tables::{Table, interpolate};
//!
//! let table = Table::new(vec![(0.0, 0.0), (1.0, 10.0)]).unwrap();
//! assert_eq!(interpolate(&table, 0.25).unwrap(), 2.5);
//! assert_eq!(interpolate(&table, 1.5).unwrap(), 10.0);
//! ```

pub mod error;
pub mod interpolate;
pub mod load;
pub mod pair;
pub mod parse;
pub mod schema;
pub mod table;

pub use error::{TableError, TableResult};
pub use interpolate::interpolate;
pub use load::{TableFormat, load_tables, parse_tables};
pub use pair::{TableKind, TablePair};
pub use parse::parse_delimited;
pub use schema::TablePairDef;
pub use table::{LowerBound, Table};
