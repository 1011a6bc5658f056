//! Constant-density ideal solution.

use crate::base::{BasePhase, SettableState};
use crate::error::{PhaseError, PhaseResult};
use std::collections::HashSet;
use tt_core::{SpeciesIndex, TtError};
use tt_core::numeric::{Real, ensure_finite, ensure_positive};
use tt_core::units::constants::{P_REF_PA, T_REF_K};
use tt_core::units::{
    Density, MolarConcentration, MolarEnthalpy, MolarEntropy, MolarMass, Pressure, Temperature,
    k as kelvin, kg_per_mol, mol_per_m3, pa,
};

/// Species data for the constant-cp reference-state model.
///
/// ```text
/// h°(T) = h_ref + cp (T - T_ref)
/// s°(T) = s_ref + cp ln(T / T_ref)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    /// Molar mass [kg/mol]
    pub molar_mass: Real,
    /// Molar enthalpy at `T_ref` [J/mol]
    pub h_ref: MolarEnthalpy,
    /// Molar entropy at `T_ref` [J/(mol·K)]
    pub s_ref: MolarEntropy,
    /// Constant molar heat capacity [J/(mol·K)]
    pub cp: Real,
}

impl Species {
    pub fn new(name: impl Into<String>, molar_mass_kg_per_mol: Real) -> Self {
        Self {
            name: name.into(),
            molar_mass: molar_mass_kg_per_mol,
            h_ref: 0.0,
            s_ref: 0.0,
            cp: 0.0,
        }
    }

    pub fn with_reference(mut self, h_ref: MolarEnthalpy, s_ref: MolarEntropy) -> Self {
        self.h_ref = h_ref;
        self.s_ref = s_ref;
        self
    }

    pub fn with_cp(mut self, cp: Real) -> Self {
        self.cp = cp;
        self
    }

    fn enthalpy_at(&self, t_k: Real) -> MolarEnthalpy {
        self.h_ref + self.cp * (t_k - T_REF_K)
    }

    fn entropy_at(&self, t_k: Real) -> MolarEntropy {
        self.s_ref + self.cp * (t_k / T_REF_K).ln()
    }
}

/// Ideal solution with fixed mass density.
///
/// Molar density follows composition through the mean molecular weight:
/// `c = ρ / M̄`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDensityIdealSolution {
    species: Vec<Species>,
    x: Vec<Real>,
    t: Temperature,
    p: Pressure,
    density: Density,
}

impl ConstDensityIdealSolution {
    /// Create a phase at 298.15 K, 1 atm, pure in the first species.
    pub fn new(species: Vec<Species>, density: Density) -> PhaseResult<Self> {
        if species.is_empty() {
            return Err(PhaseError::Config {
                what: "phase needs at least one species".into(),
            });
        }

        let mut names = HashSet::new();
        for sp in &species {
            if !names.insert(sp.name.as_str()) {
                return Err(PhaseError::DuplicateSpecies {
                    name: sp.name.clone(),
                });
            }
            ensure_positive(sp.molar_mass, "species molar mass")?;
            ensure_finite(sp.h_ref, "species reference enthalpy")?;
            ensure_finite(sp.s_ref, "species reference entropy")?;
            ensure_finite(sp.cp, "species heat capacity")?;
        }
        ensure_positive(density.value, "mass density")?;

        let mut x = vec![0.0; species.len()];
        x[0] = 1.0;

        Ok(Self {
            species,
            x,
            t: kelvin(T_REF_K),
            p: pa(P_REF_PA),
            density,
        })
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn density(&self) -> Density {
        self.density
    }

    fn species_at(&self, k: SpeciesIndex) -> PhaseResult<&Species> {
        self.check_species(k)?;
        Ok(&self.species[k.get()])
    }

    fn check_len(&self, values: &[Real]) -> PhaseResult<()> {
        if values.len() != self.species.len() {
            return Err(PhaseError::CompositionLength {
                expected: self.species.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Validate non-negative finite amounts and return them scaled to sum 1.
    fn normalized(&self, amounts: &[Real], what: &'static str) -> PhaseResult<Vec<Real>> {
        self.check_len(amounts)?;
        let mut sum = 0.0;
        for &a in amounts {
            ensure_finite(a, what)?;
            if a < 0.0 {
                return Err(TtError::OutOfRange {
                    what,
                    value: a,
                    min: 0.0,
                    max: Real::INFINITY,
                }
                .into());
            }
            sum += a;
        }
        if sum <= 0.0 {
            return Err(TtError::InvalidArg {
                what: "composition sums to zero",
            }
            .into());
        }
        Ok(amounts.iter().map(|a| a / sum).collect())
    }
}

impl BasePhase for ConstDensityIdealSolution {
    fn n_species(&self) -> usize {
        self.species.len()
    }

    fn species_name(&self, k: SpeciesIndex) -> PhaseResult<&str> {
        Ok(self.species_at(k)?.name.as_str())
    }

    fn mole_fraction(&self, k: SpeciesIndex) -> PhaseResult<Real> {
        self.check_species(k)?;
        Ok(self.x[k.get()])
    }

    fn mole_fractions(&self) -> Vec<Real> {
        self.x.clone()
    }

    fn temperature(&self) -> Temperature {
        self.t
    }

    fn pressure(&self) -> Pressure {
        self.p
    }

    fn molar_density(&self) -> MolarConcentration {
        mol_per_m3(self.density.value / self.mean_molecular_weight().value)
    }

    fn mean_molecular_weight(&self) -> MolarMass {
        kg_per_mol(
            self.species
                .iter()
                .zip(&self.x)
                .map(|(sp, x)| sp.molar_mass * x)
                .sum(),
        )
    }

    fn reference_enthalpy(&self, k: SpeciesIndex) -> PhaseResult<MolarEnthalpy> {
        Ok(self.species_at(k)?.enthalpy_at(self.t.value))
    }

    fn reference_entropy(&self, k: SpeciesIndex) -> PhaseResult<MolarEntropy> {
        Ok(self.species_at(k)?.entropy_at(self.t.value))
    }
}

impl SettableState for ConstDensityIdealSolution {
    fn set_temperature(&mut self, t: Temperature) -> PhaseResult<()> {
        ensure_positive(t.value, "temperature")?;
        self.t = t;
        Ok(())
    }

    fn set_pressure(&mut self, p: Pressure) -> PhaseResult<()> {
        ensure_positive(p.value, "pressure")?;
        self.p = p;
        Ok(())
    }

    fn set_mole_fractions(&mut self, x: &[Real]) -> PhaseResult<()> {
        self.x = self.normalized(x, "mole fraction")?;
        Ok(())
    }

    fn set_mole_fractions_no_norm(&mut self, x: &[Real]) -> PhaseResult<()> {
        self.check_len(x)?;
        for &xi in x {
            ensure_finite(xi, "mole fraction")?;
        }
        let mmw: Real = self
            .species
            .iter()
            .zip(x)
            .map(|(sp, xi)| sp.molar_mass * xi)
            .sum();
        // Molar density divides by the mean molecular weight.
        ensure_positive(mmw, "mean molecular weight")?;
        self.x = x.to_vec();
        Ok(())
    }

    fn set_mass_fractions(&mut self, y: &[Real]) -> PhaseResult<()> {
        let y = self.normalized(y, "mass fraction")?;
        let moles: Vec<Real> = y
            .iter()
            .zip(&self.species)
            .map(|(yk, sp)| yk / sp.molar_mass)
            .collect();
        self.x = self.normalized(&moles, "mass fraction")?;
        Ok(())
    }

    fn set_mass_fractions_no_norm(&mut self, y: &[Real]) -> PhaseResult<()> {
        self.check_len(y)?;
        for &yk in y {
            ensure_finite(yk, "mass fraction")?;
        }
        let moles: Vec<Real> = y
            .iter()
            .zip(&self.species)
            .map(|(yk, sp)| yk / sp.molar_mass)
            .collect();
        let total: Real = moles.iter().sum();
        ensure_positive(total, "moles per unit mass")?;
        let x: Vec<Real> = moles.iter().map(|n| n / total).collect();
        let mmw: Real = self
            .species
            .iter()
            .zip(&x)
            .map(|(sp, xi)| sp.molar_mass * xi)
            .sum();
        ensure_positive(mmw, "mean molecular weight")?;
        self.x = x;
        Ok(())
    }

    /// Density stays fixed; only the relative amounts are taken from `c`.
    fn set_concentrations(&mut self, c: &[Real]) -> PhaseResult<()> {
        self.x = self.normalized(c, "concentration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_core::numeric::{Tolerances, nearly_equal};
    use tt_core::units::kg_per_m3;

    fn two_species() -> ConstDensityIdealSolution {
        ConstDensityIdealSolution::new(
            vec![
                Species::new("A", 0.010).with_reference(-1000.0, 50.0).with_cp(20.0),
                Species::new("B", 0.030),
            ],
            kg_per_m3(2000.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_pure_in_first_species() {
        let phase = two_species();
        assert_eq!(phase.mole_fractions(), vec![1.0, 0.0]);
        assert_eq!(phase.temperature().value, T_REF_K);
        assert_eq!(phase.species_index("B"), Some(SpeciesIndex::new(1)));
        assert_eq!(phase.species_index("C"), None);
    }

    #[test]
    fn molar_density_tracks_mean_molecular_weight() {
        let mut phase = two_species();
        phase.set_mole_fractions(&[0.5, 0.5]).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(phase.mean_molecular_weight().value, 0.020, tol));
        assert!(nearly_equal(phase.molar_density().value, 100_000.0, tol));
        assert_eq!(phase.standard_concentration(), phase.molar_density().value);
        assert!(nearly_equal(
            phase.activity_concentration(SpeciesIndex::new(1)).unwrap(),
            50_000.0,
            tol
        ));
    }

    #[test]
    fn mole_fractions_normalize() {
        let mut phase = two_species();
        phase.set_mole_fractions(&[2.0, 8.0]).unwrap();
        let x = phase.mole_fractions();
        assert!((x[0] - 0.2).abs() < 1e-12);
        assert!((x[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn mole_fractions_no_norm_kept_verbatim() {
        let mut phase = two_species();
        phase.set_mole_fractions_no_norm(&[0.3, 0.3]).unwrap();
        assert_eq!(phase.mole_fractions(), vec![0.3, 0.3]);
        assert!(phase.set_mole_fractions_no_norm(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn invalid_compositions_rejected() {
        let mut phase = two_species();
        assert!(phase.set_mole_fractions(&[-0.5, 1.5]).is_err());
        assert!(phase.set_mole_fractions(&[0.0, 0.0]).is_err());
        assert!(phase.set_mole_fractions(&[f64::NAN, 1.0]).is_err());
        assert!(matches!(
            phase.set_mole_fractions(&[1.0]),
            Err(PhaseError::CompositionLength {
                expected: 2,
                actual: 1
            })
        ));
        // Failed setters leave state untouched.
        assert_eq!(phase.mole_fractions(), vec![1.0, 0.0]);
    }

    #[test]
    fn mass_fractions_convert_to_moles() {
        let mut phase = two_species();
        // Equal masses: moles ratio 3:1 (A is three times lighter).
        phase.set_mass_fractions(&[0.5, 0.5]).unwrap();
        let x = phase.mole_fractions();
        assert!((x[0] - 0.75).abs() < 1e-12);
        assert!((x[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn mass_fractions_no_norm_skip_rescaling_y() {
        let mut phase = two_species();
        // y sums to 2; moles 100 + 33.3, so x_A = 0.75 regardless of scale.
        phase.set_mass_fractions_no_norm(&[1.0, 1.0]).unwrap();
        let x = phase.mole_fractions();
        assert!((x[0] - 0.75).abs() < 1e-12);
        assert!((x[1] - 0.25).abs() < 1e-12);
        assert!((phase.mean_molecular_weight().value - 0.015).abs() < 1e-15);

        // A small negative entry is accepted as long as the mixture stays positive.
        phase.set_mass_fractions_no_norm(&[1.0, -0.003]).unwrap();
        assert!((phase.mole_fractions()[1] - (-0.1 / 99.9)).abs() < 1e-12);

        assert!(phase.set_mass_fractions_no_norm(&[0.0, 0.0]).is_err());
        assert!(phase.set_mass_fractions_no_norm(&[f64::NAN, 1.0]).is_err());
        // Positive moles but negative total mass.
        assert!(phase.set_mass_fractions_no_norm(&[0.1, -0.2]).is_err());
        assert!(matches!(
            phase.set_mass_fractions_no_norm(&[1.0]),
            Err(PhaseError::CompositionLength { .. })
        ));
    }

    #[test]
    fn concentrations_set_relative_amounts() {
        let mut phase = two_species();
        phase.set_concentrations(&[10.0, 30.0]).unwrap();
        assert!((phase.mole_fractions()[0] - 0.25).abs() < 1e-12);
        assert_eq!(phase.density().value, 2000.0);
    }

    #[test]
    fn constant_cp_reference_state() {
        let mut phase = two_species();
        let a = SpeciesIndex::new(0);
        assert_eq!(phase.reference_enthalpy(a).unwrap(), -1000.0);
        assert_eq!(phase.reference_entropy(a).unwrap(), 50.0);

        phase.set_temperature(kelvin(T_REF_K + 10.0)).unwrap();
        assert!((phase.reference_enthalpy(a).unwrap() - (-800.0)).abs() < 1e-9);
        let expected_s = 50.0 + 20.0 * ((T_REF_K + 10.0) / T_REF_K).ln();
        assert!((phase.reference_entropy(a).unwrap() - expected_s).abs() < 1e-12);
    }

    #[test]
    fn out_of_bounds_species() {
        let phase = two_species();
        let k = SpeciesIndex::new(2);
        assert!(matches!(
            phase.mole_fraction(k),
            Err(PhaseError::SpeciesOob { index: 2, n_species: 2 })
        ));
        assert!(phase.reference_enthalpy(k).is_err());
    }

    #[test]
    fn construction_validation() {
        assert!(ConstDensityIdealSolution::new(vec![], kg_per_m3(1.0)).is_err());
        assert!(matches!(
            ConstDensityIdealSolution::new(
                vec![Species::new("A", 0.01), Species::new("A", 0.02)],
                kg_per_m3(1.0)
            ),
            Err(PhaseError::DuplicateSpecies { .. })
        ));
        assert!(ConstDensityIdealSolution::new(vec![Species::new("A", 0.0)], kg_per_m3(1.0)).is_err());
        assert!(ConstDensityIdealSolution::new(vec![Species::new("A", 0.01)], kg_per_m3(-1.0)).is_err());
    }

    #[test]
    fn rejects_non_positive_temperature() {
        let mut phase = two_species();
        assert!(phase.set_temperature(kelvin(0.0)).is_err());
        assert!(phase.set_pressure(pa(-1.0)).is_err());
    }
}
