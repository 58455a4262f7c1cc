use uom::si::{
    f64::{MolarMass, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::PropertyError;

/// Lowest temperature covered by the heat capacity fits, K.
const T_MIN: f64 = 200.0;

/// Temperature at which the fits switch from the low to the high range, K.
const T_MID: f64 = 1000.0;

/// Highest temperature accepted by the heat capacity fits, K.
const T_MAX: f64 = 6000.0;

/// A gas-phase species appearing in the propellant or its combustion products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Nitrogen,
    Oxygen,
    Water,
    CarbonDioxide,
    NitrousOxide,
}

/// Heat capacity coefficients `a1..a5` of a two-range NASA 7-term fit.
///
/// `cp/R = a1 + a2·T + a3·T² + a4·T³ + a5·T⁴`
struct Nasa7 {
    low: [f64; 5],
    high: [f64; 5],
}

impl Nasa7 {
    fn cp_over_r(&self, t: f64) -> f64 {
        let a = if t < T_MID { &self.low } else { &self.high };
        a[0] + t * (a[1] + t * (a[2] + t * (a[3] + t * a[4])))
    }
}

const NITROGEN: Nasa7 = Nasa7 {
    low: [3.298_677, 1.408_240_4e-3, -3.963_222e-6, 5.641_515e-9, -2.444_854e-12],
    high: [2.926_64, 1.487_976_8e-3, -5.684_760e-7, 1.009_703_8e-10, -6.753_351e-15],
};

const OXYGEN: Nasa7 = Nasa7 {
    low: [3.782_456_36, -2.996_734_16e-3, 9.847_302_01e-6, -9.681_295_09e-9, 3.243_728_37e-12],
    high: [3.282_537_84, 1.483_087_54e-3, -7.579_666_69e-7, 2.094_705_55e-10, -2.167_177_94e-14],
};

const WATER: Nasa7 = Nasa7 {
    low: [4.198_640_56, -2.036_434_10e-3, 6.520_402_11e-6, -5.487_970_62e-9, 1.771_978_17e-12],
    high: [3.033_992_49, 2.176_918_04e-3, -1.640_725_18e-7, -9.704_198_70e-11, 1.682_009_92e-14],
};

const CARBON_DIOXIDE: Nasa7 = Nasa7 {
    low: [2.356_773_52, 8.984_596_77e-3, -7.123_562_69e-6, 2.459_190_22e-9, -1.436_995_48e-13],
    high: [3.857_460_29, 4.414_370_26e-3, -2.214_814_04e-6, 5.234_901_88e-10, -4.720_841_64e-14],
};

const NITROUS_OXIDE: Nasa7 = Nasa7 {
    low: [2.257_150_2, 1.130_472_8e-2, -1.367_131_9e-5, 9.681_980_6e-9, -2.930_718_2e-12],
    high: [4.823_072_9, 2.627_025e-3, -9.585_087_4e-7, 1.600_071_2e-10, -9.775_230_3e-15],
};

impl Species {
    /// Returns the molar mass of the species.
    #[must_use]
    pub fn molar_mass(self) -> MolarMass {
        let grams_per_mole = match self {
            Self::Nitrogen => 28.0134,
            Self::Oxygen => 31.9988,
            Self::Water => 18.01528,
            Self::CarbonDioxide => 44.0095,
            Self::NitrousOxide => 44.0128,
        };
        MolarMass::new::<gram_per_mole>(grams_per_mole)
    }

    /// Returns the dimensionless molar heat capacity `cp/R` at a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidInput`] outside 200 K to 6000 K.
    pub fn cp_over_r(self, temperature: ThermodynamicTemperature) -> Result<f64, PropertyError> {
        let t = temperature.get::<kelvin>();
        if !(T_MIN..=T_MAX).contains(&t) {
            return Err(PropertyError::InvalidInput(format!(
                "{self:?} heat capacity is fitted for {T_MIN} K to {T_MAX} K, got {t} K"
            )));
        }

        let fit = match self {
            Self::Nitrogen => &NITROGEN,
            Self::Oxygen => &OXYGEN,
            Self::Water => &WATER,
            Self::CarbonDioxide => &CARBON_DIOXIDE,
            Self::NitrousOxide => &NITROUS_OXIDE,
        };
        Ok(fit.cp_over_r(t))
    }
}
