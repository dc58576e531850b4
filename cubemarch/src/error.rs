//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for `cubemarch`
#[derive(Error, Debug)]
pub enum Error {
    /// Step size must be positive
    #[error("step size must be positive (got {0})")]
    BadStepSize(f32),

    /// Volume bounds must be ordered
    #[error("volume minimum ({min}) must be less than volume maximum ({max})")]
    BadBounds {
        /// Lower bound of the sampled volume
        min: f32,
        /// Upper bound of the sampled volume
        max: f32,
    },

    /// Settings contain a NaN or infinite value
    #[error("settings must be finite")]
    NonFiniteSettings,

    /// The lattice has too many cubes along one axis
    #[error("lattice has too many cubes along an axis ({0})")]
    LatticeTooLarge(usize),

    /// Unknown scalar field name
    #[error("undefined scalar field '{name}'; expected one of {options}")]
    UnknownField {
        /// Name that was requested
        name: String,
        /// Comma-separated list of valid names
        options: String,
    },

    /// Mesh file could not be parsed
    #[error("parse error on line {line}: {reason}")]
    ParseError {
        /// Line number (1-indexed) where parsing failed
        line: usize,
        /// Human-readable description
        reason: String,
    },

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
