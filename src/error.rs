//! Errors raised by the layout engine.
//!
//! Nothing here is recovered internally: every error is returned at the call
//! that caused it and propagates to the caller. Failing to converge inside
//! the grid solver is not an error; the best allocation found is kept.

use std::fmt;

use crate::component::ComponentId;

/// Invalid value given to a mutator.
///
/// Always returned by the setter that received the value; the previous value
/// is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A padding, weight or size was negative.
    Negative {
        /// Name of the rejected setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A padding, weight or size was `NaN` or infinite.
    NotFinite {
        /// Name of the rejected setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An alignment keyword was not recognized.
    UnsupportedAlignment(String),

    /// A grid cell already holds a component.
    CellOccupied {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },
}

impl ConfigurationError {
    /// Checks that `value` is a finite, non-negative number.
    pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            Err(ConfigurationError::NotFinite { name, value })
        } else if value < 0.0 {
            Err(ConfigurationError::Negative { name, value })
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::Negative { name, value } => {
                write!(f, "{name} must be non-negative (got {value})")
            }
            ConfigurationError::NotFinite { name, value } => {
                write!(f, "{name} must be a finite value (got {value})")
            }
            ConfigurationError::UnsupportedAlignment(keyword) => {
                write!(f, "unsupported alignment: {keyword:?}")
            }
            ConfigurationError::CellOccupied { row, col } => {
                write!(f, "cell ({row}, {col}) is occupied")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Error returned by layout operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A mutator received an invalid value.
    Configuration(ConfigurationError),

    /// `compute_layout` was called without an offer on a component that is
    /// not a root, or on a component not attached to any surface.
    InvalidLayoutCall(&'static str),

    /// The component was destroyed and cannot be used anymore.
    Reuse(ComponentId),
}

impl Error {
    /// Returns `true` for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Returns `true` for invalid layout calls.
    pub fn is_invalid_layout_call(&self) -> bool {
        matches!(self, Error::InvalidLayoutCall(_))
    }

    /// Returns `true` for operations on destroyed components.
    pub fn is_reuse(&self) -> bool {
        matches!(self, Error::Reuse(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(err) => write!(f, "invalid configuration: {err}"),
            Error::InvalidLayoutCall(reason) => write!(f, "invalid layout call: {reason}"),
            Error::Reuse(id) => write!(f, "component {id} was destroyed and cannot be reused"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Error::Configuration(err)
    }
}
