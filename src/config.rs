//! Grid settings loaded from configuration.
//!
//! A [`GridConfig`] gathers the paddings and weights of a grid, so they can
//! be kept outside of the code and applied in one go with
//! [`Grid::apply_config`].
//!
//! ## Loading from toml
//!
//! This requires the `toml` feature to be enabled.
//!
//! ```toml
//! row_padding = 4
//! column_padding = 8.5
//!
//! # `false` leaves the weight of that column inferred.
//! column_weights = [2, false, 1]
//! row_weights = [0]
//! ```
//!
//! ```rust
//! # #[cfg(feature = "toml")]
//! # {
//! use trellis::components::Grid;
//! use trellis::config;
//!
//! let config = config::load_toml("column_padding = 8\ncolumn_weights = [2, false]").unwrap();
//! let mut grid = Grid::new();
//! grid.apply_config(&config).unwrap();
//! assert_eq!(grid.column_weight(0), Some(2.0));
//! assert_eq!(grid.column_weight(1), None);
//! # }
//! ```

use crate::components::Grid;
use crate::error::ConfigurationError;

#[cfg(feature = "toml")]
use std::{fmt, fs::File, io, io::Read, path::Path};

#[cfg(feature = "toml")]
use log::warn;

/// Paddings and weights of a grid.
///
/// Unset values are left untouched when applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridConfig {
    /// Space between adjacent rows.
    pub row_padding: Option<f64>,
    /// Space between adjacent columns.
    pub column_padding: Option<f64>,
    /// Row weights, starting at row `0`. `None` means inferred.
    pub row_weights: Vec<Option<f64>>,
    /// Column weights, starting at column `0`. `None` means inferred.
    pub column_weights: Vec<Option<f64>>,
}

impl GridConfig {
    /// Checks every value, without applying anything.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let paddings = [
            ("row padding", self.row_padding),
            ("column padding", self.column_padding),
        ];
        for (name, padding) in paddings {
            if let Some(padding) = padding {
                ConfigurationError::check_non_negative(name, padding)?;
            }
        }

        let weights = self
            .row_weights
            .iter()
            .map(|&w| ("row weight", w))
            .chain(self.column_weights.iter().map(|&w| ("column weight", w)));
        for (name, weight) in weights {
            if let Some(weight) = weight {
                ConfigurationError::check_non_negative(name, weight)?;
            }
        }

        Ok(())
    }
}

impl Grid {
    /// Applies the given settings.
    ///
    /// Every value is checked first: on error, nothing is changed.
    pub fn apply_config(&mut self, config: &GridConfig) -> Result<(), crate::Error> {
        config.validate()?;

        if let Some(padding) = config.row_padding {
            self.set_row_padding(padding)?;
        }
        if let Some(padding) = config.column_padding {
            self.set_column_padding(padding)?;
        }
        for (row, weight) in config.row_weights.iter().enumerate() {
            match *weight {
                Some(weight) => self.set_row_weight(row, weight)?,
                None => self.clear_row_weight(row),
            }
        }
        for (col, weight) in config.column_weights.iter().enumerate() {
            match *weight {
                Some(weight) => self.set_column_weight(col, weight)?,
                None => self.clear_column_weight(col),
            }
        }

        Ok(())
    }
}

/// Possible error returned when loading a configuration.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
#[derive(Debug)]
pub enum Error {
    /// An error occurred when reading the file.
    Io(io::Error),

    /// An error occurred when parsing the toml content.
    Parse(toml::de::Error),

    /// A known key has a value of the wrong type.
    InvalidValue {
        /// The offending key.
        key: String,
        /// What was found there.
        found: String,
    },
}

#[cfg(feature = "toml")]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "could not read configuration: {err}"),
            Error::Parse(err) => write!(f, "could not parse configuration: {err}"),
            Error::InvalidValue { key, found } => {
                write!(f, "invalid value for {key}: {found}")
            }
        }
    }
}

#[cfg(feature = "toml")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::InvalidValue { .. } => None,
        }
    }
}

#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse(err)
    }
}

/// Loads a grid configuration from file.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_config_file<P: AsRef<Path>>(filename: P) -> Result<GridConfig, Error> {
    let content = {
        let mut content = String::new();
        let mut file = File::open(filename)?;
        file.read_to_string(&mut content)?;
        content
    };

    load_toml(&content)
}

/// Loads a grid configuration from a toml string.
///
/// Unknown keys are ignored, with a warning.
///
/// Must have the `toml` feature enabled.
#[cfg(feature = "toml")]
#[cfg_attr(feature = "doc-cfg", doc(cfg(feature = "toml")))]
pub fn load_toml(content: &str) -> Result<GridConfig, Error> {
    let table: toml::value::Table = toml::from_str(content)?;
    let mut config = GridConfig::default();

    for (key, value) in &table {
        match key.as_str() {
            "row_padding" => config.row_padding = Some(number(key, value)?),
            "column_padding" => config.column_padding = Some(number(key, value)?),
            "row_weights" => config.row_weights = weights(key, value)?,
            "column_weights" => config.column_weights = weights(key, value)?,
            _ => warn!("Unknown grid setting: {}", key),
        }
    }

    Ok(config)
}

#[cfg(feature = "toml")]
fn number(key: &str, value: &toml::Value) -> Result<f64, Error> {
    match *value {
        toml::Value::Integer(i) => Ok(i as f64),
        toml::Value::Float(f) => Ok(f),
        _ => Err(Error::InvalidValue {
            key: key.to_string(),
            found: value.to_string(),
        }),
    }
}

#[cfg(feature = "toml")]
fn weights(key: &str, value: &toml::Value) -> Result<Vec<Option<f64>>, Error> {
    let array = match value {
        toml::Value::Array(array) => array,
        _ => {
            return Err(Error::InvalidValue {
                key: key.to_string(),
                found: value.to_string(),
            })
        }
    };

    array
        .iter()
        .map(|value| match value {
            toml::Value::Boolean(false) => Ok(None),
            value => number(key, value).map(Some),
        })
        .collect()
}
