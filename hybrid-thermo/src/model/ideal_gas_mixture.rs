use hybrid_core::units::SpecificGasConstant;
use uom::si::{
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, State, fluid::GasMixture};

use super::{StateFrom, ThermodynamicProperties};

/// Ideal-gas property model for a [`GasMixture`].
///
/// Pressure follows `P = ρ·R·T` with the mixture's `R`; `cp` comes from the
/// species heat capacity fits and so varies with temperature, while
/// composition is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdealGasMixture;

impl IdealGasMixture {
    /// Computes pressure using the ideal gas law.
    #[must_use]
    pub fn pressure(
        temperature: ThermodynamicTemperature,
        density: MassDensity,
        gas_constant: SpecificGasConstant,
    ) -> Pressure {
        density * gas_constant * temperature
    }

    /// Computes density using the ideal gas law.
    #[must_use]
    pub fn density(
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        gas_constant: SpecificGasConstant,
    ) -> MassDensity {
        pressure / (gas_constant * temperature)
    }
}

impl ThermodynamicProperties<GasMixture> for IdealGasMixture {
    fn pressure(&self, state: &State<GasMixture>) -> Result<Pressure, PropertyError> {
        Ok(IdealGasMixture::pressure(
            state.temperature,
            state.density,
            state.fluid.gas_constant(),
        ))
    }

    fn cp(&self, state: &State<GasMixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        state.fluid.cp(state.temperature)
    }

    /// Computes `cv = cp − R`.
    fn cv(&self, state: &State<GasMixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(state.fluid.cp(state.temperature)? - state.fluid.gas_constant())
    }

    fn gas_constant(
        &self,
        state: &State<GasMixture>,
    ) -> Result<SpecificGasConstant, PropertyError> {
        Ok(state.fluid.gas_constant())
    }
}

/// Creates a mixture state from a composition, temperature and pressure.
impl StateFrom<GasMixture, (GasMixture, ThermodynamicTemperature, Pressure)> for IdealGasMixture {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (GasMixture, ThermodynamicTemperature, Pressure),
    ) -> Result<State<GasMixture>, Self::Error> {
        let t = temperature.get::<kelvin>();
        let p = pressure.get::<pascal>();
        if !(t.is_finite() && t > 0.0) {
            return Err(PropertyError::InvalidInput(format!(
                "temperature must be positive and finite, got {t} K"
            )));
        }
        if !(p.is_finite() && p > 0.0) {
            return Err(PropertyError::InvalidInput(format!(
                "pressure must be positive and finite, got {p} Pa"
            )));
        }

        let density = IdealGasMixture::density(temperature, pressure, fluid.gas_constant());
        Ok(State::new(temperature, density, fluid))
    }
}
