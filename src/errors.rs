//! Shared error types used across submodules.

use thiserror::Error;

use crate::parameters::ParameterError;
use crate::simulation::ConfigError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum PowerFactorError {
    /// Wraps configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Wraps parameter validation errors.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    /// Raised when exporting results fails.
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`PowerFactorError`].
pub type Result<T> = std::result::Result<T, PowerFactorError>;
