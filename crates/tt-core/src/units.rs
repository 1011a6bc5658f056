// tt-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, MolarConcentration as UomMolarConcentration,
    MolarMass as UomMolarMass, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MolarConcentration = UomMolarConcentration;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Molar enthalpy [J/mol].
///
/// Tabulated values are carried as plain f64 in SI molar units.
pub type MolarEnthalpy = f64;

/// Molar entropy [J/(mol·K)].
pub type MolarEntropy = f64;

/// Molar Gibbs energy / chemical potential [J/mol].
pub type MolarGibbs = f64;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn kg_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v)
}

#[inline]
pub fn mol_per_m3(v: f64) -> MolarConcentration {
    use uom::si::molar_concentration::mole_per_cubic_meter;
    MolarConcentration::new::<mole_per_cubic_meter>(v)
}

pub mod constants {
    /// Molar gas constant [J/(mol·K)].
    pub const GAS_CONSTANT: f64 = 8.314_462_618;

    /// Reference temperature for tabulated species thermo [K].
    pub const T_REF_K: f64 = 298.15;

    /// Standard pressure [Pa].
    pub const P_REF_PA: f64 = 101_325.0;
}
