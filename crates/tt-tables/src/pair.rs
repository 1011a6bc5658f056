//! Enthalpy/entropy table pair.

use crate::error::TableResult;
use crate::interpolate::interpolate;
use crate::table::Table;
use std::fmt;
use tt_core::numeric::Real;
use tt_core::units::{MolarEnthalpy, MolarEntropy};

/// Which property a table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Enthalpy,
    Entropy,
}

impl TableKind {
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Enthalpy => "enthalpy",
            TableKind::Entropy => "entropy",
        }
    }

    /// Parse a section name; accepts the full name or its symbol (`h`, `s`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "enthalpy" | "h" => Some(TableKind::Enthalpy),
            "entropy" | "s" => Some(TableKind::Entropy),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two tables driving the tracked species' reference state.
///
/// Molar enthalpy in J/mol, molar entropy in J/(mol·K).
#[derive(Debug, Clone, PartialEq)]
pub struct TablePair {
    pub enthalpy: Table,
    pub entropy: Table,
}

impl TablePair {
    pub fn new(enthalpy: Table, entropy: Table) -> Self {
        Self { enthalpy, entropy }
    }

    /// Validate both point lists, tagging errors with the offending table.
    pub fn from_points(
        enthalpy: Vec<(Real, Real)>,
        entropy: Vec<(Real, Real)>,
    ) -> TableResult<Self> {
        let enthalpy =
            Table::new(enthalpy).map_err(|e| e.in_table(TableKind::Enthalpy.name()))?;
        let entropy = Table::new(entropy).map_err(|e| e.in_table(TableKind::Entropy.name()))?;
        Ok(Self { enthalpy, entropy })
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Enthalpy => &self.enthalpy,
            TableKind::Entropy => &self.entropy,
        }
    }

    /// Interpolate both tables at `x`.
    pub fn evaluate(&self, x: Real) -> TableResult<(MolarEnthalpy, MolarEntropy)> {
        let h = interpolate(&self.enthalpy, x)?;
        let s = interpolate(&self.entropy, x)?;
        Ok((h, s))
    }
}
