//! Thermodynamic property modeling for hybrid motor propellants.
//!
//! Combustion products are described by a [`fluid::GasMixture`] and evaluated
//! with the [`model::IdealGasMixture`] model. Liquid nitrous oxide density is
//! available from [`fluid::NitrousOxide`] for sizing the oxidizer load.

mod error;
mod state;

pub mod fluid;
pub mod model;

pub use error::PropertyError;
pub use state::State;
