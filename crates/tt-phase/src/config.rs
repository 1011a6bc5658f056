//! Phase configuration document (YAML/JSON).
//!
//! ```yaml
//! name: graphite-anode
//! temperature_k: 298.15
//! density_kg_m3: 2260.0
//! species:
//!   - name: Li(C6)
//!     molar_mass_kg_per_mol: 0.0790
//!   - name: V(C6)
//!     molar_mass_kg_per_mol: 0.0721
//! mole_fractions: [0.4, 0.6]
//! tracked_species: Li(C6)
//! tables:
//!   file: lithiated_graphite.csv
//! ```
//!
//! Loading is parse, then validate, then build; a failure at any step yields
//! no phase.

use crate::base::{BasePhase, SettableState};
use crate::error::{PhaseError, PhaseResult};
use crate::ideal::{ConstDensityIdealSolution, Species};
use crate::phase::TabulatedPhase;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;
use tt_core::SpeciesIndex;
use tt_core::units::constants::{P_REF_PA, T_REF_K};
use tt_core::units::{k, kg_per_m3, pa};
use tt_tables::{TablePair, TablePairDef, load_tables};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseDef {
    pub name: String,
    #[serde(default = "default_temperature_k")]
    pub temperature_k: f64,
    #[serde(default = "default_pressure_pa")]
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
    pub species: Vec<SpeciesDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mole_fractions: Option<Vec<f64>>,
    pub tracked_species: TrackedSpeciesDef,
    pub tables: TableSourceDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_tolerance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesDef {
    pub name: String,
    pub molar_mass_kg_per_mol: f64,
    #[serde(default)]
    pub h_ref_j_per_mol: f64,
    #[serde(default)]
    pub s_ref_j_per_mol_k: f64,
    #[serde(default)]
    pub cp_j_per_mol_k: f64,
}

/// Tracked species by position or by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TrackedSpeciesDef {
    Index(SpeciesIndex),
    Name(String),
}

/// Where the composition tables come from.
///
/// Inline tables are decoded in [`PhaseDef::build`]; a malformed row is an
/// invalid table, not a document error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TableSourceDef {
    /// Table file; relative paths resolve against the config file's directory.
    File { file: PathBuf },
    Inline(serde_yaml::Value),
}

impl TableSourceDef {
    pub fn inline(def: &TablePairDef) -> PhaseResult<Self> {
        Ok(Self::Inline(serde_yaml::to_value(def)?))
    }
}

fn default_temperature_k() -> f64 {
    T_REF_K
}

fn default_pressure_pa() -> f64 {
    P_REF_PA
}

fn config_error(what: impl Into<String>) -> PhaseError {
    PhaseError::Config { what: what.into() }
}

/// Structural checks that need no table data.
pub fn validate_phase_def(def: &PhaseDef) -> PhaseResult<()> {
    if def.species.is_empty() {
        return Err(config_error(format!("phase '{}' has no species", def.name)));
    }

    let mut names = HashSet::new();
    for sp in &def.species {
        if !names.insert(sp.name.as_str()) {
            return Err(PhaseError::DuplicateSpecies {
                name: sp.name.clone(),
            });
        }
    }

    for (field, value) in [
        ("temperature_k", def.temperature_k),
        ("pressure_pa", def.pressure_pa),
        ("density_kg_m3", def.density_kg_m3),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(config_error(format!("{field} = {value} must be positive")));
        }
    }

    if let Some(x) = &def.mole_fractions {
        if x.len() != def.species.len() {
            return Err(PhaseError::CompositionLength {
                expected: def.species.len(),
                actual: x.len(),
            });
        }
    }

    if let Some(tol) = def.composition_tolerance {
        if !tol.is_finite() || tol < 0.0 {
            return Err(config_error(format!(
                "composition_tolerance = {tol} must be non-negative"
            )));
        }
    }

    resolve_tracked(def)?;
    Ok(())
}

fn resolve_tracked(def: &PhaseDef) -> PhaseResult<SpeciesIndex> {
    match &def.tracked_species {
        TrackedSpeciesDef::Index(idx) if idx.get() < def.species.len() => Ok(*idx),
        TrackedSpeciesDef::Index(idx) => Err(PhaseError::SpeciesOob {
            index: idx.get(),
            n_species: def.species.len(),
        }),
        TrackedSpeciesDef::Name(name) => def
            .species
            .iter()
            .position(|sp| &sp.name == name)
            .map(SpeciesIndex::new)
            .ok_or_else(|| PhaseError::UnknownSpecies { name: name.clone() }),
    }
}

impl PhaseDef {
    /// Load tables (resolving files against `base_dir`) and build the phase.
    pub fn build(&self, base_dir: &Path) -> PhaseResult<TabulatedPhase> {
        validate_phase_def(self)?;

        let tables = match &self.tables {
            TableSourceDef::Inline(value) => {
                TablePairDef::from_yaml_value(value.clone())?.build()?
            }
            TableSourceDef::File { file } => load_tables(&base_dir.join(file))?,
        };
        self.build_with_tables(tables)
    }

    /// Build the phase from already-validated tables.
    pub fn build_with_tables(&self, tables: TablePair) -> PhaseResult<TabulatedPhase> {
        validate_phase_def(self)?;

        let species = self
            .species
            .iter()
            .map(|sp| {
                Species::new(sp.name.clone(), sp.molar_mass_kg_per_mol)
                    .with_reference(sp.h_ref_j_per_mol, sp.s_ref_j_per_mol_k)
                    .with_cp(sp.cp_j_per_mol_k)
            })
            .collect();

        let mut base = ConstDensityIdealSolution::new(species, kg_per_m3(self.density_kg_m3))?;
        base.set_temperature(k(self.temperature_k))?;
        base.set_pressure(pa(self.pressure_pa))?;
        if let Some(x) = &self.mole_fractions {
            base.set_mole_fractions(x)?;
        }

        let tracked = resolve_tracked(self)?;
        let mut phase = TabulatedPhase::new(base, tracked, tables)?;
        if let Some(tol) = self.composition_tolerance {
            phase = phase.with_tolerance(tol)?;
        }
        // Evaluate once so a table/composition fault fails setup, not the first query.
        phase.ensure_updated()?;

        info!(
            phase = %self.name,
            tracked = %phase.base().species_name(tracked)?,
            n_species = phase.n_species(),
            "built tabulated phase"
        );
        Ok(phase)
    }
}

pub fn from_yaml_str(content: &str, base_dir: &Path) -> PhaseResult<TabulatedPhase> {
    let def: PhaseDef = serde_yaml::from_str(content)?;
    def.build(base_dir)
}

pub fn from_json_str(content: &str, base_dir: &Path) -> PhaseResult<TabulatedPhase> {
    let def: PhaseDef = serde_json::from_str(content)?;
    def.build(base_dir)
}

pub fn load_def(path: &Path) -> PhaseResult<PhaseDef> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let def: PhaseDef = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    validate_phase_def(&def)?;
    Ok(def)
}

/// Load a phase config (`.json`, any case, as JSON; anything else as YAML).
pub fn load(path: &Path) -> PhaseResult<TabulatedPhase> {
    let def = load_def(path)?;
    def.build(path.parent().unwrap_or_else(|| Path::new(".")))
}

pub fn load_yaml(path: &Path) -> PhaseResult<TabulatedPhase> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content, path.parent().unwrap_or_else(|| Path::new(".")))
}

pub fn load_json(path: &Path) -> PhaseResult<TabulatedPhase> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content, path.parent().unwrap_or_else(|| Path::new(".")))
}
