mod error;

use std::{
    marker::PhantomData,
    sync::{Mutex, MutexGuard},
};

use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
};
use uom::si::{
    f64::{MassDensity, MolarMass, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    thermodynamic_temperature::kelvin,
};

use crate::{PropertyError, fluid::NitrousOxide, model::SaturatedLiquid};

pub use error::CoolPropError;

/// Marks fluids that can be evaluated with the [`CoolProp`] model.
///
/// Implementors name the backend and fluid used to build a `CoolProp`
/// `AbstractState`.
pub trait CoolPropFluid: Default + Send + Sync + 'static {
    const BACKEND: &'static str;
    const NAME: &'static str;
}

impl CoolPropFluid for NitrousOxide {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "NitrousOxide";
}

/// A real-fluid property model backed by `CoolProp`.
pub struct CoolProp<F: CoolPropFluid> {
    state: Mutex<AbstractState>,
    _f: PhantomData<F>,
}

impl<F: CoolPropFluid> CoolProp<F> {
    /// Constructs a `CoolProp` model for `F`.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the `AbstractState` cannot be created for
    /// `F::BACKEND` and `F::NAME`.
    pub fn new() -> Result<Self, CoolPropError> {
        let state = AbstractState::new(F::BACKEND, F::NAME)?;
        Ok(Self {
            state: Mutex::new(state),
            _f: PhantomData,
        })
    }

    /// Returns the molar mass of the fluid.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the call fails.
    pub fn molar_mass(&self) -> Result<MolarMass, CoolPropError> {
        let abstract_state = self.state.lock()?;
        let molar_mass = abstract_state.keyed_output(FluidTrivialParam::MolarMass)?;
        Ok(MolarMass::new::<kilogram_per_mole>(molar_mass))
    }

    /// Locks the `AbstractState` and moves it onto the saturated-liquid line.
    fn lock_saturated_liquid(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MutexGuard<'_, AbstractState>, CoolPropError> {
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(FluidInputPair::QT, 0.0, temperature.get::<kelvin>())?;
        Ok(abstract_state)
    }
}

impl<F: CoolPropFluid> SaturatedLiquid for CoolProp<F> {
    fn saturated_liquid_density(
        &self,
        temperature: ThermodynamicTemperature,
    ) -> Result<MassDensity, PropertyError> {
        let abstract_state = self.lock_saturated_liquid(temperature)?;
        let density = abstract_state
            .keyed_output(FluidParam::DMass)
            .map_err(CoolPropError::Rfluids)?;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(density))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{molar_mass::gram_per_mole, thermodynamic_temperature::degree_fahrenheit};

    #[test]
    fn nitrous_oxide_molar_mass() {
        let model = CoolProp::<NitrousOxide>::new().unwrap();
        let molar_mass = model.molar_mass().unwrap();
        assert_relative_eq!(molar_mass.get::<gram_per_mole>(), 44.0128, max_relative = 1e-4);
    }

    #[test]
    fn liquid_density_agrees_with_correlation() {
        let model = CoolProp::<NitrousOxide>::new().unwrap();

        for temp_f in [30.0, 50.0, 70.0, 90.0] {
            let t = ThermodynamicTemperature::new::<degree_fahrenheit>(temp_f);
            let real = model.saturated_liquid_density(t).unwrap();
            let correlated = NitrousOxide::saturated_liquid_density(t).unwrap();
            assert_relative_eq!(
                real.get::<kilogram_per_cubic_meter>(),
                correlated.get::<kilogram_per_cubic_meter>(),
                max_relative = 1e-2
            );
        }
    }

    #[test]
    fn no_liquid_above_critical_point() {
        let model = CoolProp::<NitrousOxide>::new().unwrap();
        let hot = ThermodynamicTemperature::new::<kelvin>(320.0);
        assert!(model.saturated_liquid_density(hot).is_err());
    }
}
