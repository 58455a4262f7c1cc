use thiserror::Error;

use crate::{combustion::CombustionError, nozzle::NozzleError};

/// A fatal error raised by one simulation step.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimulationError {
    #[error(transparent)]
    Combustion(#[from] CombustionError),

    #[error(transparent)]
    Nozzle(#[from] NozzleError),
}
