//! Thermodynamic property models.
//!
//! [`IdealGasMixture`] evaluates the combustion products. Liquid oxidizer
//! density comes from a [`SaturatedLiquid`] model: the N₂O correlation on
//! [`NitrousOxide`](crate::fluid::NitrousOxide) by default, or `CoolProp`
//! with the `coolprop` feature.

#[cfg(feature = "coolprop")]
mod coolprop;
mod ideal_gas_mixture;
mod traits;

#[cfg(feature = "coolprop")]
pub use coolprop::{CoolProp, CoolPropError, CoolPropFluid};
pub use ideal_gas_mixture::IdealGasMixture;
pub use traits::{SaturatedLiquid, StateFrom, ThermodynamicProperties};
