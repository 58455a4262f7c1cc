use thiserror::Error;
use uom::si::f64::{Length, MassRate};

/// Fatal errors from a combustion step.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CombustionError {
    /// The port grew past the grain's outer diameter.
    #[error(
        "fuel grain burned through: port diameter {port_diameter:?} exceeds outer diameter {outer_diameter:?}"
    )]
    BurnThrough {
        port_diameter: Length,
        outer_diameter: Length,
    },

    /// The mass flow iteration did not settle within the iteration cap.
    #[error(
        "mass flow iteration did not converge after {iterations} iterations (last total {last_total:?}, delta {delta:?})"
    )]
    NonConvergence {
        iterations: usize,
        last_total: MassRate,
        delta: MassRate,
    },

    /// An iterate became NaN or infinite.
    #[error("mass flow iterate is not finite at iteration {iteration}")]
    NonFiniteIterate { iteration: usize },
}

/// The oxidizer/fuel ratio requested while the fuel flow is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("oxidizer/fuel ratio is undefined with zero fuel flow")]
pub struct UndefinedRatio;
