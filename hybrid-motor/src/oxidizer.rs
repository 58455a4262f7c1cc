//! Oxidizer tank and injector feed.

use hybrid_core::{
    constraint::{Constrained, NonNegative, StrictlyPositive},
    units,
};
use hybrid_thermo::{fluid::NitrousOxide, model::SaturatedLiquid};
use serde::Deserialize;
use uom::{
    ConstZero,
    si::f64::{Mass, MassRate, ThermodynamicTemperature, Time, Volume},
};

use crate::ConfigError;

/// Oxidizer feed configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OxidizerConfig {
    pub load: OxidizerLoad,
    #[serde(deserialize_with = "units::deserialize")]
    pub injector_mass_flow_rate: MassRate,
    pub injector_count: u32,
}

/// How much oxidizer the tank starts with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OxidizerLoad {
    /// A volume of saturated liquid N₂O stored at an ambient temperature.
    Liquid {
        #[serde(deserialize_with = "units::deserialize")]
        volume: Volume,
        #[serde(deserialize_with = "units::deserialize")]
        temperature: ThermodynamicTemperature,
    },

    /// A known oxidizer mass.
    Mass {
        #[serde(deserialize_with = "units::deserialize")]
        mass: Mass,
    },
}

/// A blowdown oxidizer tank feeding the injectors at a fixed rate.
///
/// Depletion is an explicit operation: [`advance`](Self::advance) drains one
/// step's worth of oxidizer, while [`mass`](Self::mass) and
/// [`mass_flow_rate`](Self::mass_flow_rate) are plain reads.
#[derive(Debug, Clone, PartialEq)]
pub struct OxidizerTank {
    mass: Mass,
    feed_rate: MassRate,
    mass_flow_rate: MassRate,
}

impl OxidizerTank {
    /// Builds a tank from its configuration.
    ///
    /// A liquid load is converted to mass with the N₂O saturated-liquid
    /// density correlation at the storage temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the load or injector values are not
    /// physical, or the storage temperature is at or above N₂O's critical point.
    pub fn new(config: &OxidizerConfig) -> Result<Self, ConfigError> {
        Self::with_liquid_model(&NitrousOxide, config)
    }

    /// Builds a tank, sizing a liquid load with the given density model.
    ///
    /// # Errors
    ///
    /// See [`OxidizerTank::new`].
    pub fn with_liquid_model(
        liquid: &impl SaturatedLiquid,
        config: &OxidizerConfig,
    ) -> Result<Self, ConfigError> {
        let mass = match &config.load {
            OxidizerLoad::Liquid {
                volume,
                temperature,
            } => {
                let volume = StrictlyPositive::new(*volume)
                    .map_err(ConfigError::constraint("oxidizer.load.volume"))?
                    .into_inner();
                let density = liquid
                    .saturated_liquid_density(*temperature)
                    .map_err(ConfigError::property("oxidizer liquid density"))?;
                volume * density
            }
            OxidizerLoad::Mass { mass } => *mass,
        };
        let mass = NonNegative::new(mass).map_err(ConfigError::constraint("oxidizer.load"))?;

        if config.injector_count == 0 {
            return Err(ConfigError::Invalid {
                field: "oxidizer.injector_count",
                reason: "at least one injector is required".to_string(),
            });
        }
        let per_injector = StrictlyPositive::new(config.injector_mass_flow_rate)
            .map_err(ConfigError::constraint("oxidizer.injector_mass_flow_rate"))?;
        let total_rate = per_injector.into_inner() * f64::from(config.injector_count);
        let feed_rate = StrictlyPositive::new(total_rate)
            .map_err(ConfigError::constraint("oxidizer.injector_mass_flow_rate"))?;

        Ok(Self::with_mass(mass, feed_rate))
    }

    /// Creates a tank holding `mass` that feeds at `feed_rate` while not empty.
    #[must_use]
    pub fn with_mass(
        mass: Constrained<Mass, NonNegative>,
        feed_rate: Constrained<MassRate, StrictlyPositive>,
    ) -> Self {
        Self {
            mass: mass.into_inner(),
            feed_rate: feed_rate.into_inner(),
            mass_flow_rate: MassRate::ZERO,
        }
    }

    /// Drains one time step of oxidizer and returns the flow for that step.
    ///
    /// The full feed rate is delivered while oxidizer remains after the
    /// draw; once the tank runs dry the flow is zero and the mass stays at zero.
    pub fn advance(&mut self, dt: Time) -> MassRate {
        self.mass -= self.feed_rate * dt;

        if self.mass > Mass::ZERO {
            self.mass_flow_rate = self.feed_rate;
        } else {
            self.mass = Mass::ZERO;
            self.mass_flow_rate = MassRate::ZERO;
        }
        self.mass_flow_rate
    }

    /// Remaining oxidizer mass.
    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Oxidizer flow delivered by the most recent [`advance`](Self::advance).
    #[must_use]
    pub fn mass_flow_rate(&self) -> MassRate {
        self.mass_flow_rate
    }

    /// Combined feed rate of all injectors.
    #[must_use]
    pub fn feed_rate(&self) -> MassRate {
        self.feed_rate
    }

    /// Whether the tank has run dry.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.mass <= Mass::ZERO
    }
}
