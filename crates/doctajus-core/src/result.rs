//! Convenience result type alias for DocTajus.

use crate::error::AppError;

/// A specialized `Result` type for DocTajus operations.
pub type AppResult<T> = Result<T, AppError>;
