//! The time-stepping driver.

mod error;
mod record;
mod summary;

use hybrid_core::constraint::StrictlyPositive;
use hybrid_thermo::{
    PropertyError,
    fluid::GasMixture,
    model::{IdealGasMixture, StateFrom, ThermodynamicProperties},
};
use log::{debug, info, warn};
use uom::{
    ConstZero,
    si::{
        f64::{Length, Pressure, ThermodynamicTemperature, Time},
        force::newton,
        length::millimeter,
        mass::kilogram,
        mass_rate::kilogram_per_second,
        time::second,
    },
};

use crate::{
    ConfigError, MotorConfig,
    combustion::{CombustionChamber, CombustionError, FuelGrain},
    nozzle::{Nozzle, NozzleError},
    oxidizer::OxidizerTank,
};

pub use error::SimulationError;
pub use record::StepRecord;
pub use summary::{MotorClass, RunSummary};

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// The tank ran dry. The normal end of a burn.
    OxidizerExhausted,
    /// The port grew past the grain's outer diameter.
    BurnThrough {
        port_diameter: Length,
        outer_diameter: Length,
    },
    /// The mass flow iteration failed to settle.
    NonConvergence(CombustionError),
    /// The nozzle chain produced a non-physical state.
    InvalidFlowState(NozzleError),
}

impl Termination {
    /// Whether the run ended by exhausting its oxidizer.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::OxidizerExhausted)
    }
}

impl From<SimulationError> for Termination {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Combustion(CombustionError::BurnThrough {
                port_diameter,
                outer_diameter,
            }) => Self::BurnThrough {
                port_diameter,
                outer_diameter,
            },
            SimulationError::Combustion(err) => Self::NonConvergence(err),
            SimulationError::Nozzle(err) => Self::InvalidFlowState(err),
        }
    }
}

/// Result of a single [`Motor::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Recorded(StepRecord),
    Finished(Termination),
}

/// Every recorded step of a run, why it stopped, and its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
    pub termination: Termination,
    pub summary: RunSummary,
}

/// A hybrid motor being simulated.
///
/// Owns the tank, the combustion chamber and the nozzle, and advances them
/// together one fixed time step at a time.
#[derive(Debug, Clone)]
pub struct Motor<M = IdealGasMixture> {
    time: Time,
    time_step: Time,
    tank: OxidizerTank,
    chamber: CombustionChamber,
    nozzle: Nozzle<M>,
}

impl Motor {
    /// Builds a motor from its configuration using the ideal-gas mixture model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found while validating the configuration.
    pub fn new(config: &MotorConfig) -> Result<Self, ConfigError> {
        Self::with_model(IdealGasMixture, config)
    }
}

impl<M> Motor<M>
where
    M: ThermodynamicProperties<GasMixture>
        + StateFrom<
            GasMixture,
            (GasMixture, ThermodynamicTemperature, Pressure),
            Error = PropertyError,
        >,
{
    /// Builds a motor whose nozzle uses the given property model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found while validating the configuration.
    pub fn with_model(thermo: M, config: &MotorConfig) -> Result<Self, ConfigError> {
        let time_step = StrictlyPositive::new(config.time_step)
            .map_err(ConfigError::constraint("time_step"))?
            .into_inner();
        let tank = OxidizerTank::new(&config.oxidizer)?;
        let grain = FuelGrain::new(&config.grain)?;
        let chamber = CombustionChamber::new(grain, config.regression, config.iteration)?;
        let nozzle = Nozzle::with_model(thermo, &config.nozzle, &config.chamber)?;

        Ok(Self {
            time: Time::ZERO,
            time_step,
            tank,
            chamber,
            nozzle,
        })
    }

    /// Time at the end of the last recorded step.
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    #[must_use]
    pub fn time_step(&self) -> Time {
        self.time_step
    }

    #[must_use]
    pub fn tank(&self) -> &OxidizerTank {
        &self.tank
    }

    #[must_use]
    pub fn chamber(&self) -> &CombustionChamber {
        &self.chamber
    }

    #[must_use]
    pub fn nozzle(&self) -> &Nozzle<M> {
        &self.nozzle
    }

    /// Advances the motor by one time step.
    ///
    /// Drains the tank, then runs the combustion step and the nozzle solve on
    /// the resulting flow. A step in which the tank delivers no oxidizer ends
    /// the run without a record.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the combustion step or the nozzle
    /// solve fails. Either is fatal to the run.
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        let oxidizer_mass_flow_rate = self.tank.advance(self.time_step);
        if self.tank.is_exhausted() {
            return Ok(StepOutcome::Finished(Termination::OxidizerExhausted));
        }

        let combustion = self.chamber.step(oxidizer_mass_flow_rate, self.time_step)?;
        let nozzle = self.nozzle.solve(combustion.flow.total_mass_flow_rate)?;
        self.time += self.time_step;

        debug!(
            "t = {:.3} s: ox = {:.4} kg, mdot = {:.5} kg/s, port = {:.4} mm, thrust = {:.2} N",
            self.time.get::<second>(),
            self.tank.mass().get::<kilogram>(),
            combustion.flow.total_mass_flow_rate.get::<kilogram_per_second>(),
            combustion.port_diameter.get::<millimeter>(),
            nozzle.thrust.get::<newton>(),
        );

        Ok(StepOutcome::Recorded(StepRecord {
            time: self.time,
            oxidizer_mass: self.tank.mass(),
            oxidizer_mass_flow_rate,
            combustion,
            nozzle,
        }))
    }

    /// Steps until the run ends and returns everything it recorded.
    ///
    /// A fatal step error ends the run; the records made before it are kept
    /// and the error becomes the report's [`Termination`].
    #[must_use]
    pub fn run(mut self) -> RunReport {
        let mut records = Vec::new();

        let termination = loop {
            match self.step() {
                Ok(StepOutcome::Recorded(record)) => records.push(record),
                Ok(StepOutcome::Finished(termination)) => break termination,
                Err(err) => {
                    warn!(
                        "run stopped at t = {:.3} s after {} steps: {err}",
                        self.time.get::<second>(),
                        records.len()
                    );
                    break Termination::from(err);
                }
            }
        };

        let summary = RunSummary::from_records(&records, self.time_step);
        info!(
            "run finished ({termination:?}): {} steps, burn time {:.2} s, impulse {:.1} N·s, {}",
            records.len(),
            summary.burn_time.get::<second>(),
            summary.total_impulse.value,
            summary.designation(),
        );

        RunReport {
            records,
            termination,
            summary,
        }
    }
}
