//! Errors from selecting and parameterising a wind law.

use std::error::Error;
use std::fmt;

/// Errors detected while building a wind law.
#[derive(Clone, Debug, PartialEq)]
pub enum WindError {
    /// The selector names no known law.
    UnknownKind {
        /// The rejected selector.
        name: String,
    },
    /// A required parameter was not supplied.
    MissingParameter {
        /// Law being built.
        wind: &'static str,
        /// Name of the missing parameter.
        parameter: &'static str,
    },
    /// A parameter is outside its admissible range.
    InvalidParameter {
        /// Law being built.
        wind: &'static str,
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for WindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { name } => write!(f, "unknown wind law '{name}'"),
            Self::MissingParameter { wind, parameter } => {
                write!(f, "wind '{wind}' requires parameter '{parameter}'")
            }
            Self::InvalidParameter {
                wind,
                parameter,
                value,
            } => write!(f, "wind '{wind}': invalid {parameter} = {value}"),
        }
    }
}

impl Error for WindError {}
