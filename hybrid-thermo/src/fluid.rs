//! Fluids used by the motor model.
//!
//! - [`Species`]: individual gases with molar mass and NASA 7-term heat capacity.
//! - [`GasMixture`]: a normalized composition of species, evaluated as an ideal gas.
//! - [`NitrousOxide`]: saturated-liquid density of the oxidizer.

mod mixture;
mod nitrous_oxide;
mod species;

pub use mixture::GasMixture;
pub use nitrous_oxide::NitrousOxide;
pub use species::Species;

/// Universal gas constant, J/mol·K.
pub(crate) const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;
