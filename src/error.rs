//! Error types and result utilities for raincloud figure construction.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`RainCloudError`].
pub type PlotResult<T> = Result<T, RainCloudError>;

/// Top-level error returned by every fallible operation in the crate.
#[derive(Error, Debug)]
pub enum RainCloudError {
    /// A caller-supplied parameter or option was invalid.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The paired dataset is malformed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A palette could not be resolved or parsed.
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Writing or displaying a rendered figure failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors raised for invalid parameters and option arrays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is outside its accepted domain.
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        /// Name of the offending parameter.
        parameter: String,
        /// Human readable reason.
        reason: String,
    },

    /// A per-panel option array is too short for the panel being drawn.
    #[error("Option '{parameter}' has {len} entries but panel {index} needs one")]
    OutOfRange {
        /// Name of the option array.
        parameter: String,
        /// Panel index that was requested.
        index: usize,
        /// Number of entries supplied.
        len: usize,
    },
}

impl ParameterError {
    /// Build an [`ParameterError::InvalidValue`].
    pub fn invalid_value(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`ParameterError::OutOfRange`].
    pub fn out_of_range(parameter: impl Into<String>, index: usize, len: usize) -> Self {
        Self::OutOfRange {
            parameter: parameter.into(),
            index,
            len,
        }
    }
}

/// Errors describing a malformed paired dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The two columns are not the same length, so rows cannot be paired.
    #[error("Paired columns differ in length: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first column.
        left: usize,
        /// Length of the second column.
        right: usize,
    },
}

/// Errors raised while resolving colors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No palette is registered under this name.
    #[error("Unknown palette name: {0}")]
    UnknownPalette(String),

    /// The string is not a `#rrggbb` hex color.
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Errors raised by output backends.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Filesystem failure while writing a figure.
    #[error("Failed to write figure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for RainCloudError {
    fn from(err: std::io::Error) -> Self {
        Self::Render(RenderError::Io(err))
    }
}
