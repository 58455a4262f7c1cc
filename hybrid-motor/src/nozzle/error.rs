use hybrid_thermo::PropertyError;
use thiserror::Error;

use super::FlowStation;

/// Errors raised while solving the nozzle flow chain.
///
/// Both variants are fatal to the step that produced them.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum NozzleError {
    /// An intermediate of the flow chain is non-physical.
    ///
    /// Covers negative radicands, zero denominators, non-finite values, a
    /// supersonic inlet, and an exit Mach number below one.
    #[error("invalid flow state in {quantity}: {reason}")]
    InvalidFlowState {
        quantity: &'static str,
        reason: String,
    },

    /// The property model failed to evaluate a station.
    #[error("thermodynamic model failed at the {station} station")]
    Property {
        station: FlowStation,
        #[source]
        source: PropertyError,
    },
}

impl NozzleError {
    pub(crate) fn invalid(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFlowState {
            quantity,
            reason: reason.into(),
        }
    }

    /// Returns a mapper wrapping a property failure at the given station.
    pub(crate) fn property(station: FlowStation) -> impl FnOnce(PropertyError) -> Self {
        move |source| Self::Property { station, source }
    }
}
