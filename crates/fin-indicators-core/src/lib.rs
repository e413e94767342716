pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "ratios")]
pub mod ratios;

pub use error::FinIndicatorsError;
pub use types::*;

/// Standard result type for all fin-indicators operations
pub type FinIndicatorsResult<T> = Result<T, FinIndicatorsError>;
