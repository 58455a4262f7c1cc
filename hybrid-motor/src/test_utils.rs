//! Shared fixtures for unit tests.

use hybrid_core::units::SpecificGasConstant;
use hybrid_thermo::{
    PropertyError, State,
    fluid::GasMixture,
    model::{IdealGasMixture, StateFrom, ThermodynamicProperties},
};
use uom::si::{
    f64::{
        Length, Mass, MassDensity, MassRate, Pressure, SpecificHeatCapacity,
        ThermodynamicTemperature,
    },
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    thermodynamic_temperature::kelvin,
};

use crate::{
    MotorConfig,
    combustion::{CombustionChamber, FuelGrain},
    nozzle::{ChamberConfig, Nozzle, NozzleConfig, NozzleGeometry},
    oxidizer::OxidizerLoad,
};

/// The end-to-end scenario motor: 0.5 kg of oxidizer at 0.03 kg/s into a
/// 0.0254 m × 0.34 m port.
pub(crate) fn scenario_config() -> MotorConfig {
    let mut config = MotorConfig::reference();
    config.oxidizer.load = OxidizerLoad::Mass {
        mass: Mass::new::<kilogram>(0.5),
    };
    config.oxidizer.injector_mass_flow_rate = MassRate::new::<kilogram_per_second>(0.03);
    config.oxidizer.injector_count = 1;
    config.grain.port_diameter = Length::new::<meter>(0.0254);
    config.grain.port_length = Length::new::<meter>(0.34);
    config.grain.fuel_density = MassDensity::new::<kilogram_per_cubic_meter>(3957.0);
    config
}

pub(crate) fn scenario_chamber() -> CombustionChamber {
    let config = scenario_config();
    let grain = FuelGrain::new(&config.grain).expect("scenario grain is valid");
    CombustionChamber::new(grain, config.regression, config.iteration)
        .expect("scenario regression settings are valid")
}

/// The reference nozzle with the given geometry and default chamber conditions.
pub(crate) fn reference_nozzle(geometry: NozzleGeometry) -> Nozzle {
    let config = NozzleConfig {
        geometry,
        ..MotorConfig::reference().nozzle
    };
    Nozzle::new(&config, &ChamberConfig::default()).expect("reference nozzle is valid")
}

/// Ideal-gas model that refuses to build states below a temperature.
///
/// Lets tests drive a property failure at a chosen flow station.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FakeThermo {
    pub(crate) min_temperature: ThermodynamicTemperature,
}

impl ThermodynamicProperties<GasMixture> for FakeThermo {
    fn pressure(&self, state: &State<GasMixture>) -> Result<Pressure, PropertyError> {
        IdealGasMixture.pressure(state)
    }

    fn cp(&self, state: &State<GasMixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        IdealGasMixture.cp(state)
    }

    fn cv(&self, state: &State<GasMixture>) -> Result<SpecificHeatCapacity, PropertyError> {
        IdealGasMixture.cv(state)
    }

    fn gas_constant(
        &self,
        state: &State<GasMixture>,
    ) -> Result<SpecificGasConstant, PropertyError> {
        IdealGasMixture.gas_constant(state)
    }
}

impl StateFrom<GasMixture, (GasMixture, ThermodynamicTemperature, Pressure)> for FakeThermo {
    type Error = PropertyError;

    fn state_from(
        &self,
        input: (GasMixture, ThermodynamicTemperature, Pressure),
    ) -> Result<State<GasMixture>, Self::Error> {
        if input.1 < self.min_temperature {
            return Err(PropertyError::InvalidInput(format!(
                "fake model rejects {} K",
                input.1.get::<kelvin>()
            )));
        }
        IdealGasMixture.state_from(input)
    }
}
