use std::fmt;

use hybrid_core::units::SpecificGasConstant;
use hybrid_thermo::{
    PropertyError, State,
    fluid::GasMixture,
    model::{StateFrom, ThermodynamicProperties},
};
use uom::si::{
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature, Velocity},
    ratio::ratio,
};

/// A point along the nozzle flow path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStation {
    Chamber,
    Star,
    Exit,
}

impl fmt::Display for FlowStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Chamber => "chamber",
            Self::Star => "star",
            Self::Exit => "exit",
        })
    }
}

/// The combustion gas evaluated at one flow station.
///
/// Each station owns its state outright. Re-evaluating one snapshot never
/// changes another, even when they started as copies of the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureSnapshot {
    station: FlowStation,
    state: State<GasMixture>,
}

/// Properties of a snapshot, evaluated once and read many times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationProperties {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
    pub heat_capacity_ratio: f64,
    pub gas_constant: SpecificGasConstant,
    pub cp: SpecificHeatCapacity,
    pub speed_of_sound: Velocity,
}

impl MixtureSnapshot {
    pub(crate) fn new(station: FlowStation, state: State<GasMixture>) -> Self {
        Self { station, state }
    }

    /// Returns an independent copy of this snapshot tagged for another station.
    pub(crate) fn copy_to(&self, station: FlowStation) -> Self {
        Self {
            station,
            state: self.state.clone(),
        }
    }

    #[must_use]
    pub fn station(&self) -> FlowStation {
        self.station
    }

    #[must_use]
    pub fn state(&self) -> &State<GasMixture> {
        &self.state
    }

    /// Replaces this snapshot's state with the same composition at `(temperature, pressure)`.
    ///
    /// # Errors
    ///
    /// Returns the model's error if the state cannot be constructed; the
    /// snapshot is left unchanged in that case.
    pub fn reevaluate<M>(
        &mut self,
        thermo: &M,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<(), PropertyError>
    where
        M: StateFrom<
                GasMixture,
                (GasMixture, ThermodynamicTemperature, Pressure),
                Error = PropertyError,
            >,
    {
        let fluid = self.state.fluid.clone();
        self.state = thermo.state_from((fluid, temperature, pressure))?;
        Ok(())
    }

    /// Evaluates the properties the flow chain needs at this station.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropertyError`] raised by the model.
    pub fn properties<M>(&self, thermo: &M) -> Result<StationProperties, PropertyError>
    where
        M: ThermodynamicProperties<GasMixture>,
    {
        Ok(StationProperties {
            temperature: self.state.temperature,
            pressure: thermo.pressure(&self.state)?,
            density: self.state.density,
            heat_capacity_ratio: thermo.heat_capacity_ratio(&self.state)?.get::<ratio>(),
            gas_constant: thermo.gas_constant(&self.state)?,
            cp: thermo.cp(&self.state)?,
            speed_of_sound: thermo.speed_of_sound(&self.state)?,
        })
    }
}
