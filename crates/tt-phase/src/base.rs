//! Base-phase collaborator interface.
//!
//! The tabulated engine only overrides the reference state of one species.
//! Everything else (species bookkeeping, composition, density, closed-form
//! reference thermo for the other species) comes from a [`BasePhase`].

use crate::error::{PhaseError, PhaseResult};
use tt_core::SpeciesIndex;
use tt_core::numeric::Real;
use tt_core::units::{
    MolarConcentration, MolarEnthalpy, MolarEntropy, MolarMass, Pressure, Temperature,
};

/// Ideal-solution phase queried by the tabulated engine.
///
/// Per-species methods return [`PhaseError::SpeciesOob`] for an index past
/// [`BasePhase::n_species`].
pub trait BasePhase {
    fn n_species(&self) -> usize;

    fn species_name(&self, k: SpeciesIndex) -> PhaseResult<&str>;

    /// Look up a species by name.
    fn species_index(&self, name: &str) -> Option<SpeciesIndex> {
        (0..self.n_species())
            .map(SpeciesIndex::new)
            .find(|&k| self.species_name(k).is_ok_and(|n| n == name))
    }

    /// Current mole fraction of species `k`.
    fn mole_fraction(&self, k: SpeciesIndex) -> PhaseResult<Real>;

    fn mole_fractions(&self) -> Vec<Real> {
        (0..self.n_species())
            .map(SpeciesIndex::new)
            .filter_map(|k| self.mole_fraction(k).ok())
            .collect()
    }

    fn temperature(&self) -> Temperature;

    fn pressure(&self) -> Pressure;

    /// Total molar density [mol/m³].
    fn molar_density(&self) -> MolarConcentration;

    /// Mean molecular weight [kg/mol].
    fn mean_molecular_weight(&self) -> MolarMass;

    /// Activity concentration `x_k · c` [mol/m³].
    fn activity_concentration(&self, k: SpeciesIndex) -> PhaseResult<Real> {
        Ok(self.mole_fraction(k)? * self.molar_density().value)
    }

    /// Standard concentration `1 / v_molar` [mol/m³], shared by all species.
    fn standard_concentration(&self) -> Real {
        self.molar_density().value
    }

    /// Closed-form reference-state molar enthalpy [J/mol].
    fn reference_enthalpy(&self, k: SpeciesIndex) -> PhaseResult<MolarEnthalpy>;

    /// Closed-form reference-state molar entropy [J/(mol·K)].
    fn reference_entropy(&self, k: SpeciesIndex) -> PhaseResult<MolarEntropy>;

    /// Fail with [`PhaseError::SpeciesOob`] unless `k` names a species.
    fn check_species(&self, k: SpeciesIndex) -> PhaseResult<()> {
        if k.get() < self.n_species() {
            Ok(())
        } else {
            Err(PhaseError::SpeciesOob {
                index: k.get(),
                n_species: self.n_species(),
            })
        }
    }
}

/// Mutable thermodynamic state of a base phase.
pub trait SettableState: BasePhase {
    fn set_temperature(&mut self, t: Temperature) -> PhaseResult<()>;

    fn set_pressure(&mut self, p: Pressure) -> PhaseResult<()>;

    /// Set mole fractions, normalizing to sum 1.
    fn set_mole_fractions(&mut self, x: &[Real]) -> PhaseResult<()>;

    /// Set mole fractions exactly as given.
    fn set_mole_fractions_no_norm(&mut self, x: &[Real]) -> PhaseResult<()>;

    /// Set composition from mass fractions (normalized).
    fn set_mass_fractions(&mut self, y: &[Real]) -> PhaseResult<()>;

    /// Set composition from mass fractions as given, without rescaling `y`.
    fn set_mass_fractions_no_norm(&mut self, y: &[Real]) -> PhaseResult<()>;

    /// Set composition from species concentrations [mol/m³].
    fn set_concentrations(&mut self, c: &[Real]) -> PhaseResult<()>;
}
