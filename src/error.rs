//! Error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    /// Byte material had the wrong size for its key type.
    #[error("Invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// Status code the node reported is not one we know.
    #[error("Unknown contract status code {0}")]
    UnknownStatus(u8),
    /// Both division thresholds are the same value.
    #[error("Division thresholds must differ")]
    DegenerateDivision,
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
