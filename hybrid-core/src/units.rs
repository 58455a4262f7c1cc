//! Quantity aliases and unit handling.
//!
//! Inside the physics crates every value is a `uom` quantity, so adding a
//! length to a mass is a compile error. The remaining way for a mismatch to
//! occur is text entering from a configuration file; [`parse_quantity`]
//! rejects those with [`QuantityParseError::DimensionalMismatch`].

mod extensions;
mod parse;

use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, Z0},
};

pub use extensions::TemperatureOps;
pub use parse::{Dimension, Dimensioned, QuantityParseError, deserialize, parse_quantity};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Mass flux, kg/m²·s in SI.
///
/// Mass flow rate per unit of port surface area; the forcing variable of the
/// fuel regression correlation.
pub type MassFlux = Quantity<ISQ<N2, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Total impulse, N·s in SI.
pub type Impulse = Quantity<ISQ<P1, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
