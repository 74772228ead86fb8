//! Convenience result type alias for Tempus.

use crate::error::AppError;

/// A specialized `Result` type for Tempus operations.
pub type AppResult<T> = Result<T, AppError>;
