use hybrid_core::units::MassFlux;
use uom::si::f64::{Force, Length, Mass, MassRate, Time, Velocity};

use crate::{combustion::CombustionStep, nozzle::NozzleSolution};

/// Everything computed during one recorded time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Simulation time at the end of the step.
    pub time: Time,
    /// Oxidizer left in the tank after the step's draw.
    pub oxidizer_mass: Mass,
    pub oxidizer_mass_flow_rate: MassRate,
    pub combustion: CombustionStep,
    pub nozzle: NozzleSolution,
}

impl StepRecord {
    #[must_use]
    pub fn total_mass_flow_rate(&self) -> MassRate {
        self.combustion.flow.total_mass_flow_rate
    }

    #[must_use]
    pub fn total_mass_flux(&self) -> MassFlux {
        self.combustion.flow.total_mass_flux
    }

    #[must_use]
    pub fn fuel_mass_flow_rate(&self) -> MassRate {
        self.combustion.flow.fuel_mass_flow_rate
    }

    #[must_use]
    pub fn regression_rate(&self) -> Velocity {
        self.combustion.flow.regression_rate
    }

    #[must_use]
    pub fn port_diameter(&self) -> Length {
        self.combustion.port_diameter
    }

    /// `None` until fuel has flowed at least once.
    #[must_use]
    pub fn oxidizer_fuel_ratio(&self) -> Option<f64> {
        self.combustion.oxidizer_fuel_ratio
    }

    #[must_use]
    pub fn thrust(&self) -> Force {
        self.nozzle.thrust
    }
}
