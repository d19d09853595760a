pub mod error;
pub mod kpi;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::FinAnalystError;
pub use types::*;

/// Standard result type for all fin-analyst operations
pub type FinAnalystResult<T> = Result<T, FinAnalystError>;
