//! Time-stepped simulation of a hybrid rocket motor.
//!
//! Each step runs in a fixed order:
//!
//! 1. [`oxidizer::OxidizerTank::advance`] drains the tank and yields the oxidizer flow.
//! 2. [`combustion::CombustionChamber::step`] resolves the total mass flow by
//!    fixed-point iteration and regresses the fuel port.
//! 3. [`nozzle::Nozzle::solve`] carries the flow through the isentropic nozzle
//!    chain and produces thrust.
//! 4. [`simulation::Motor`] records a [`simulation::StepRecord`].
//!
//! A run ends when the oxidizer is exhausted or on the first fatal condition
//! (burn-through, non-convergence, or an invalid flow state).

pub mod combustion;
pub mod config;
pub mod nozzle;
pub mod oxidizer;
pub mod simulation;

pub use config::{ConfigError, MotorConfig};
pub use simulation::{Motor, RunReport, RunSummary, StepRecord, Termination};

#[cfg(test)]
pub(crate) mod test_utils;
