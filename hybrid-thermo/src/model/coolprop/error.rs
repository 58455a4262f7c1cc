use std::sync::PoisonError;

use thiserror::Error;

use crate::PropertyError;

/// Errors from the `CoolProp` backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoolPropError {
    #[error("CoolProp call failed: {0}")]
    Rfluids(#[from] rfluids::native::CoolPropError),

    #[error("CoolProp state lock was poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for CoolPropError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

impl From<CoolPropError> for PropertyError {
    fn from(err: CoolPropError) -> Self {
        PropertyError::Calculation(err.to_string())
    }
}
