use hybrid_core::units::SpecificGasConstant;
use uom::si::{
    f64::{MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermodynamicTemperature, Velocity},
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::{PropertyError, State};

/// Trait for computing thermodynamic properties from a fluid's state.
///
/// Implementors supply pressure, both specific heats and the gas constant.
/// The ratio of specific heats and the speed of sound are derived from those
/// and rarely need overriding.
pub trait ThermodynamicProperties<Fluid> {
    /// Returns the pressure for the given state.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the pressure cannot be calculated.
    fn pressure(&self, state: &State<Fluid>) -> Result<Pressure, PropertyError>;

    /// Returns the specific heat capacity at constant pressure.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if `cp` cannot be calculated.
    fn cp(&self, state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;

    /// Returns the specific heat capacity at constant volume.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if `cv` cannot be calculated.
    fn cv(&self, state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;

    /// Returns the specific gas constant `R`.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if `R` is not defined for the fluid.
    fn gas_constant(&self, state: &State<Fluid>) -> Result<SpecificGasConstant, PropertyError>;

    /// Returns the ratio of specific heats `K = cp/cv`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Undefined`] if `cv` is not positive, or any
    /// error from evaluating the specific heats.
    fn heat_capacity_ratio(&self, state: &State<Fluid>) -> Result<Ratio, PropertyError> {
        let cp = self.cp(state)?;
        let cv = self.cv(state)?;
        if cv.value <= 0.0 || !cv.value.is_finite() {
            return Err(PropertyError::Undefined {
                property: "heat_capacity_ratio",
                context: Some(format!("cv = {} J/kg·K", cv.value)),
            });
        }
        Ok(cp / cv)
    }

    /// Returns the ideal-gas speed of sound `a = sqrt(K·R·T)`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Calculation`] if `K·R·T` is not a positive
    /// finite number, or any error from evaluating `K` or `R`.
    fn speed_of_sound(&self, state: &State<Fluid>) -> Result<Velocity, PropertyError> {
        let k = self.heat_capacity_ratio(state)?.value;
        let r = self.gas_constant(state)?.value;
        let t = state.temperature.get::<kelvin>();

        let a_squared = k * r * t;
        if !(a_squared.is_finite() && a_squared > 0.0) {
            return Err(PropertyError::Calculation(format!(
                "speed of sound undefined for K = {k}, R = {r}, T = {t}"
            )));
        }
        Ok(Velocity::new::<meter_per_second>(a_squared.sqrt()))
    }
}

/// Trait for creating thermodynamic states from an input combination.
///
/// Models implement this for each `Input` they support. Re-evaluating a
/// snapshot at a new temperature and pressure goes through this trait.
pub trait StateFrom<Fluid, Input> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns a `State<Fluid>` based on the provided `Input`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from the given inputs.
    fn state_from(&self, input: Input) -> Result<State<Fluid>, Self::Error>;
}

/// Trait for models that know the saturated-liquid density of a fluid.
///
/// Used to turn a stored liquid volume into a mass.
pub trait SaturatedLiquid {
    /// Returns the saturated-liquid density at a temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if no liquid phase exists at the
    /// temperature or the model fails to evaluate it.
    fn saturated_liquid_density(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError>;
}
