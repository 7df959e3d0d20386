//! Error types for spectrum

use thiserror::Error;

/// Spectrum error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpectrumError {
    /// Value needs more bits than the declared length
    #[error("value needs {required} bits but spectrum length is {length}")]
    LengthExceeded { required: u64, length: usize },

    /// Text does not parse as an unsigned integer in the given base
    #[error("failed to parse {text:?} in base {base}")]
    ParseFailure { text: String, base: u32 },

    /// Radix outside 2..=36
    #[error("invalid base: {0}")]
    InvalidBase(u32),

    /// Value does not fit in a u64
    #[error("value of {bits} bits is not representable as u64")]
    NotRepresentable { bits: u64 },

    /// Operands of a strict combinator differ in length
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Target weight larger than the declared length
    #[error("target weight {target} exceeds spectrum length {length}")]
    WeightOutOfRange { target: usize, length: usize },

    /// Combined length does not fit in usize
    #[error("merged length overflows: {left} + {right}")]
    LengthOverflow { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
