use uom::si::{
    f64::{MassDensity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, model::SaturatedLiquid};

/// Critical temperature of nitrous oxide, K.
const CRITICAL_TEMPERATURE: f64 = 309.57;

/// Critical density of nitrous oxide, kg/m³.
const CRITICAL_DENSITY: f64 = 452.0;

/// Coefficients of the saturated-liquid density correlation.
const LIQUID_DENSITY_COEFFS: [f64; 4] = [1.723_28, -0.839_50, 0.510_60, -0.104_12];

/// Nitrous oxide, the self-pressurizing liquid oxidizer.
///
/// Only the saturated-liquid branch is modeled; it sets how much oxidizer
/// a tank of given volume holds at a given ambient temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NitrousOxide;

impl NitrousOxide {
    /// Returns the critical temperature.
    #[must_use]
    pub fn critical_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(CRITICAL_TEMPERATURE)
    }

    /// Returns the saturated-liquid density at a temperature.
    ///
    /// Uses `ρ = ρc·exp(b₁·τ^(1/3) + b₂·τ^(2/3) + b₃·τ + b₄·τ^(4/3))`
    /// with `τ = 1 − T/Tc`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidInput`] if the temperature is not
    /// positive or is at or above the critical temperature, where no liquid
    /// phase exists.
    pub fn saturated_liquid_density(
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError> {
        let t = temperature.get::<kelvin>();
        if !(t > 0.0 && t < CRITICAL_TEMPERATURE) {
            return Err(PropertyError::InvalidInput(format!(
                "nitrous oxide is not a saturated liquid at {t} K (critical point {CRITICAL_TEMPERATURE} K)"
            )));
        }

        let tau = 1.0 - t / CRITICAL_TEMPERATURE;
        let [b1, b2, b3, b4] = LIQUID_DENSITY_COEFFS;
        let exponent = b1 * tau.cbrt()
            + b2 * tau.powf(2.0 / 3.0)
            + b3 * tau
            + b4 * tau.powf(4.0 / 3.0);

        Ok(MassDensity::new::<kilogram_per_cubic_meter>(
            CRITICAL_DENSITY * exponent.exp(),
        ))
    }
}

impl SaturatedLiquid for NitrousOxide {
    fn saturated_liquid_density(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError> {
        NitrousOxide::saturated_liquid_density(temperature)
    }
}
