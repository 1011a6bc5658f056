//! Constant-density phase with a tabulated tracked species.
//!
//! One species (the *tracked* species) takes its reference-state enthalpy and
//! entropy from composition tables; every other species keeps the base
//! phase's closed forms. The solution stays ideal: activity coefficients are
//! unity and the tables only shift the reference state.

use crate::base::{BasePhase, SettableState};
use crate::cache::{CacheState, ReferenceStateCache};
use crate::error::PhaseResult;
use crate::ideal::ConstDensityIdealSolution;
use std::cell::Cell;
use tt_core::numeric::Real;
use tt_core::{SpeciesIndex, TtError};
use tt_core::units::constants::GAS_CONSTANT;
use tt_core::units::{MolarEnthalpy, MolarEntropy, MolarGibbs, Pressure, Temperature};
use tt_tables::TablePair;

/// Floor for `ln(x)` in chemical potentials.
const SMALL_MOLE_FRACTION: Real = 1e-300;

/// How a species' reference state is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesThermo {
    /// Interpolated from the composition tables.
    Tabulated,
    /// Delegated to the base phase.
    Base,
}

/// Ideal solution whose tracked species has composition-dependent reference thermo.
///
/// The cache sits in a [`Cell`], so queries take `&self` while the type stays
/// `!Sync`; share a phase across threads only behind a lock.
#[derive(Debug, Clone)]
pub struct TabulatedPhase<B = ConstDensityIdealSolution> {
    base: B,
    tracked: SpeciesIndex,
    tables: TablePair,
    cache: Cell<ReferenceStateCache>,
}

impl<B: BasePhase> TabulatedPhase<B> {
    pub const MODEL_NAME: &'static str = "ConstDensityTabulatedThermo";

    /// Wrap `base`, tabulating species `tracked`.
    ///
    /// The cache starts stale; the first property query evaluates the tables.
    pub fn new(base: B, tracked: SpeciesIndex, tables: TablePair) -> PhaseResult<Self> {
        base.check_species(tracked)?;
        Ok(Self {
            base,
            tracked,
            tables,
            cache: Cell::new(ReferenceStateCache::new()),
        })
    }

    /// Replace the composition staleness tolerance (resets the cache).
    pub fn with_tolerance(self, tolerance: Real) -> PhaseResult<Self> {
        self.cache.set(ReferenceStateCache::with_tolerance(tolerance)?);
        Ok(self)
    }

    pub fn model_name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn tracked_species(&self) -> SpeciesIndex {
        self.tracked
    }

    pub fn tables(&self) -> &TablePair {
        &self.tables
    }

    pub fn n_species(&self) -> usize {
        self.base.n_species()
    }

    pub fn temperature(&self) -> Temperature {
        self.base.temperature()
    }

    pub fn pressure(&self) -> Pressure {
        self.base.pressure()
    }

    pub fn species_thermo(&self, k: SpeciesIndex) -> SpeciesThermo {
        if k == self.tracked {
            SpeciesThermo::Tabulated
        } else {
            SpeciesThermo::Base
        }
    }

    /// Current mole fraction of the tracked species.
    pub fn tracked_mole_fraction(&self) -> PhaseResult<Real> {
        self.base.mole_fraction(self.tracked)
    }

    /// Bring the cache in line with the base phase's current composition.
    ///
    /// Returns `true` when the tables were evaluated.
    pub fn ensure_updated(&self) -> PhaseResult<bool> {
        let x = self.tracked_mole_fraction()?;
        let mut cache = self.cache.get();
        let recomputed = cache.ensure_updated(x, &self.tables)?;
        self.cache.set(cache);
        Ok(recomputed)
    }

    pub fn cache_state(&self) -> PhaseResult<CacheState> {
        Ok(self.cache.get().state(self.tracked_mole_fraction()?))
    }

    /// Number of table evaluations performed so far.
    pub fn evaluation_count(&self) -> u64 {
        self.cache.get().evaluations()
    }

    fn tabulated_values(&self) -> PhaseResult<(MolarEnthalpy, MolarEntropy)> {
        self.ensure_updated()?;
        let (h, s) = self
            .cache
            .get()
            .values()
            .ok_or(TtError::Invariant {
                what: "reference-state cache empty after update",
            })?;
        Ok((h, s))
    }

    /// Activity concentration [mol/m³].
    pub fn activity_concentration(&self, k: SpeciesIndex) -> PhaseResult<Real> {
        self.base.check_species(k)?;
        match self.species_thermo(k) {
            SpeciesThermo::Tabulated => {
                Ok(self.tracked_mole_fraction()? * self.base.molar_density().value)
            }
            SpeciesThermo::Base => self.base.activity_concentration(k),
        }
    }

    pub fn activity_concentrations(&self) -> PhaseResult<Vec<Real>> {
        self.species_indices()
            .map(|k| self.activity_concentration(k))
            .collect()
    }

    /// Standard concentration `1 / v_molar` [mol/m³].
    ///
    /// Follows from the constant density alone; the tables play no part.
    pub fn standard_concentration(&self) -> Real {
        self.base.standard_concentration()
    }

    /// Always 1: the tables move the reference state, not the ideality.
    pub fn activity_coefficient(&self, k: SpeciesIndex) -> PhaseResult<Real> {
        self.base.check_species(k)?;
        Ok(1.0)
    }

    pub fn activity_coefficients(&self) -> Vec<Real> {
        vec![1.0; self.n_species()]
    }

    /// Activity `C_k / C°`, equal to the mole fraction here.
    pub fn activity(&self, k: SpeciesIndex) -> PhaseResult<Real> {
        Ok(self.activity_concentration(k)? / self.standard_concentration())
    }

    /// Reference-state molar enthalpy [J/mol].
    pub fn reference_enthalpy(&self, k: SpeciesIndex) -> PhaseResult<MolarEnthalpy> {
        self.base.check_species(k)?;
        match self.species_thermo(k) {
            SpeciesThermo::Tabulated => Ok(self.tabulated_values()?.0),
            SpeciesThermo::Base => self.base.reference_enthalpy(k),
        }
    }

    /// Reference-state molar entropy [J/(mol·K)].
    pub fn reference_entropy(&self, k: SpeciesIndex) -> PhaseResult<MolarEntropy> {
        self.base.check_species(k)?;
        match self.species_thermo(k) {
            SpeciesThermo::Tabulated => Ok(self.tabulated_values()?.1),
            SpeciesThermo::Base => self.base.reference_entropy(k),
        }
    }

    pub fn reference_enthalpies(&self) -> PhaseResult<Vec<MolarEnthalpy>> {
        self.species_indices()
            .map(|k| self.reference_enthalpy(k))
            .collect()
    }

    pub fn reference_entropies(&self) -> PhaseResult<Vec<MolarEntropy>> {
        self.species_indices()
            .map(|k| self.reference_entropy(k))
            .collect()
    }

    /// Reference-state molar Gibbs energy `h° - T s°` [J/mol].
    pub fn reference_gibbs(&self, k: SpeciesIndex) -> PhaseResult<MolarGibbs> {
        let t = self.base.temperature().value;
        Ok(self.reference_enthalpy(k)? - t * self.reference_entropy(k)?)
    }

    /// Standard chemical potentials `μ°_k` [J/mol] for every species.
    pub fn standard_chemical_potentials(&self) -> PhaseResult<Vec<MolarGibbs>> {
        self.species_indices()
            .map(|k| self.reference_gibbs(k))
            .collect()
    }

    /// Ideal-solution chemical potential `μ°_k + RT ln x_k` [J/mol].
    pub fn chemical_potential(&self, k: SpeciesIndex) -> PhaseResult<MolarGibbs> {
        let mu0 = self.reference_gibbs(k)?;
        let x = self.base.mole_fraction(k)?.max(SMALL_MOLE_FRACTION);
        let rt = GAS_CONSTANT * self.base.temperature().value;
        Ok(mu0 + rt * x.ln())
    }

    fn species_indices(&self) -> impl Iterator<Item = SpeciesIndex> {
        (0..self.base.n_species()).map(SpeciesIndex::new)
    }
}

/// Composition setters refresh the cache eagerly so a bad state fails at the setter.
impl<B: SettableState> TabulatedPhase<B> {
    pub fn set_temperature(&mut self, t: Temperature) -> PhaseResult<()> {
        self.base.set_temperature(t)
    }

    pub fn set_pressure(&mut self, p: Pressure) -> PhaseResult<()> {
        self.base.set_pressure(p)
    }

    pub fn set_mole_fractions(&mut self, x: &[Real]) -> PhaseResult<()> {
        self.base.set_mole_fractions(x)?;
        self.ensure_updated().map(|_| ())
    }

    pub fn set_mole_fractions_no_norm(&mut self, x: &[Real]) -> PhaseResult<()> {
        self.base.set_mole_fractions_no_norm(x)?;
        self.ensure_updated().map(|_| ())
    }

    pub fn set_mass_fractions(&mut self, y: &[Real]) -> PhaseResult<()> {
        self.base.set_mass_fractions(y)?;
        self.ensure_updated().map(|_| ())
    }

    pub fn set_mass_fractions_no_norm(&mut self, y: &[Real]) -> PhaseResult<()> {
        self.base.set_mass_fractions_no_norm(y)?;
        self.ensure_updated().map(|_| ())
    }

    pub fn set_concentrations(&mut self, c: &[Real]) -> PhaseResult<()> {
        self.base.set_concentrations(c)?;
        self.ensure_updated().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhaseError;
    use crate::ideal::Species;
    use tt_core::units::{k as kelvin, kg_per_m3};

    const LI: SpeciesIndex = SpeciesIndex::new(0);
    const VAC: SpeciesIndex = SpeciesIndex::new(1);

    fn phase() -> TabulatedPhase {
        let base = ConstDensityIdealSolution::new(
            vec![
                Species::new("Li(C6)", 0.0790),
                Species::new("V(C6)", 0.0721).with_reference(-500.0, 30.0),
            ],
            kg_per_m3(2260.0),
        )
        .unwrap();
        let tables = TablePair::from_points(
            vec![(0.0, 100.0), (0.5, 150.0), (1.0, 100.0)],
            vec![(0.0, 10.0), (0.5, 20.0), (1.0, 10.0)],
        )
        .unwrap();
        TabulatedPhase::new(base, LI, tables).unwrap()
    }

    #[test]
    fn rejects_unknown_tracked_index() {
        let base = phase().base().clone();
        let err = TabulatedPhase::new(base, SpeciesIndex::new(5), phase().tables().clone())
            .unwrap_err();
        assert!(matches!(err, PhaseError::SpeciesOob { index: 5, .. }));
    }

    #[test]
    fn dispatch_by_species() {
        let p = phase();
        assert_eq!(p.species_thermo(LI), SpeciesThermo::Tabulated);
        assert_eq!(p.species_thermo(VAC), SpeciesThermo::Base);
        assert_eq!(p.model_name(), "ConstDensityTabulatedThermo");
    }

    #[test]
    fn starts_stale_then_fresh() {
        let p = phase();
        assert_eq!(p.cache_state().unwrap(), CacheState::Stale);
        assert_eq!(p.evaluation_count(), 0);
        p.reference_enthalpy(LI).unwrap();
        assert_eq!(p.cache_state().unwrap(), CacheState::Fresh);
        assert_eq!(p.evaluation_count(), 1);
    }

    #[test]
    fn tracked_species_uses_tables() {
        let mut p = phase();
        p.set_mole_fractions(&[0.25, 0.75]).unwrap();
        assert!((p.reference_enthalpy(LI).unwrap() - 125.0).abs() < 1e-12);
        assert!((p.reference_entropy(LI).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn other_species_use_base() {
        let mut p = phase();
        p.set_mole_fractions(&[0.25, 0.75]).unwrap();
        assert_eq!(p.reference_enthalpy(VAC).unwrap(), -500.0);
        assert_eq!(p.reference_entropy(VAC).unwrap(), 30.0);
    }

    #[test]
    fn queries_do_not_recompute_without_composition_change() {
        let mut p = phase();
        p.set_mole_fractions(&[0.4, 0.6]).unwrap();
        let after_set = p.evaluation_count();
        for _ in 0..10 {
            p.reference_enthalpy(LI).unwrap();
            p.reference_entropy(LI).unwrap();
            p.reference_gibbs(LI).unwrap();
        }
        assert_eq!(p.evaluation_count(), after_set);

        p.set_mole_fractions(&[0.6, 0.4]).unwrap();
        assert_eq!(p.evaluation_count(), after_set + 1);
    }

    #[test]
    fn activity_coefficients_are_unity() {
        let mut p = phase();
        for x in [0.0, 0.1, 0.5, 0.9, 1.0] {
            p.set_mole_fractions(&[x, 1.0 - x]).unwrap();
            assert_eq!(p.activity_coefficient(LI).unwrap(), 1.0);
            assert_eq!(p.activity_coefficient(VAC).unwrap(), 1.0);
            assert_eq!(p.activity_coefficients(), vec![1.0, 1.0]);
        }
        assert!(p.activity_coefficient(SpeciesIndex::new(2)).is_err());
    }

    #[test]
    fn concentrations_follow_molar_density() {
        let mut p = phase();
        p.set_mole_fractions(&[0.25, 0.75]).unwrap();
        let c = p.base().molar_density().value;
        assert_eq!(p.standard_concentration(), c);
        let conc = p.activity_concentrations().unwrap();
        assert!((conc[0] - 0.25 * c).abs() < 1e-9 * c);
        assert!((conc[1] - 0.75 * c).abs() < 1e-9 * c);
        assert!((p.activity(LI).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn gibbs_and_chemical_potential() {
        let mut p = phase();
        p.set_mole_fractions(&[0.5, 0.5]).unwrap();
        let t = p.temperature().value;
        let mu0 = p.reference_gibbs(LI).unwrap();
        assert!((mu0 - (150.0 - t * 20.0)).abs() < 1e-9);

        let mu = p.chemical_potential(LI).unwrap();
        let expected = mu0 + GAS_CONSTANT * t * 0.5_f64.ln();
        assert!((mu - expected).abs() < 1e-9);

        let all = p.standard_chemical_potentials().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], mu0);
    }

    #[test]
    fn chemical_potential_finite_at_zero_mole_fraction() {
        let mut p = phase();
        p.set_mole_fractions(&[0.0, 1.0]).unwrap();
        assert!(p.chemical_potential(LI).unwrap().is_finite());
    }

    #[test]
    fn temperature_moves_gibbs_not_tables() {
        let mut p = phase();
        p.set_mole_fractions(&[0.5, 0.5]).unwrap();
        let evaluations = p.evaluation_count();
        p.set_temperature(kelvin(350.0)).unwrap();
        assert_eq!(p.reference_enthalpy(LI).unwrap(), 150.0);
        assert!((p.reference_gibbs(LI).unwrap() - (150.0 - 350.0 * 20.0)).abs() < 1e-9);
        assert_eq!(p.evaluation_count(), evaluations);
    }

    #[test]
    fn clone_has_independent_cache() {
        let mut p = phase();
        p.set_mole_fractions(&[0.5, 0.5]).unwrap();
        let mut q = p.clone();
        q.set_mole_fractions(&[0.25, 0.75]).unwrap();
        assert_eq!(p.reference_enthalpy(LI).unwrap(), 150.0);
        assert!((q.reference_enthalpy(LI).unwrap() - 125.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_composition_leaves_phase_usable() {
        let mut p = phase();
        p.set_mole_fractions(&[0.5, 0.5]).unwrap();
        assert!(p.set_mole_fractions(&[-1.0, 2.0]).is_err());
        assert_eq!(p.reference_enthalpy(LI).unwrap(), 150.0);
    }

    #[test]
    fn custom_tolerance() {
        let mut p = phase().with_tolerance(1e-6).unwrap();
        p.set_mole_fractions_no_norm(&[0.5, 0.5]).unwrap();
        let n = p.evaluation_count();
        p.set_mole_fractions_no_norm(&[0.5 + 1e-9, 0.5 - 1e-9]).unwrap();
        assert_eq!(p.evaluation_count(), n);
        assert!(phase().with_tolerance(-1.0).is_err());
    }

    #[test]
    fn mass_fractions_no_norm_refresh_tables() {
        let mut p = phase();
        // Masses proportional to molar masses give equal moles.
        p.set_mass_fractions_no_norm(&[0.0790, 0.0721]).unwrap();
        assert!((p.base().mole_fraction(LI).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(p.cache_state().unwrap(), CacheState::Fresh);
        assert!((p.reference_enthalpy(LI).unwrap() - 150.0).abs() < 1e-9);

        let n = p.evaluation_count();
        assert!(p.set_mass_fractions_no_norm(&[0.0, 0.0]).is_err());
        assert_eq!(p.evaluation_count(), n);
    }
}
