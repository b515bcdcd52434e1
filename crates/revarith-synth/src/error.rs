//! Error types for arithmetic synthesis.

use revarith_auto::ScopeError;
use revarith_ir::{BitId, IrError};
use thiserror::Error;

use crate::op::ArithmeticOp;

/// Errors that can occur while synthesizing an arithmetic circuit.
///
/// Every variant is raised before the first gate of the failing request is
/// emitted.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SynthError {
    /// The same-size synthesizer was given registers of different lengths.
    #[error("Register length mismatch: input has {input_len} bits, target has {target_len}")]
    LengthMismatch { input_len: usize, target_len: usize },

    /// The register shapes are valid but no construction exists for them.
    #[error(
        "Unsupported configuration: {reason} (input {input_len} bits, target {target_len} bits)"
    )]
    UnsupportedConfiguration {
        reason: &'static str,
        input_len: usize,
        target_len: usize,
    },

    /// The input is wider than the target and options forbid truncation.
    #[error(
        "Input register ({input_len} bits) is wider than target ({target_len} bits) and truncation is disabled"
    )]
    OversizedInput { input_len: usize, target_len: usize },

    /// A controlled operation was requested without a spare bit to borrow.
    #[error(
        "Insufficient workspace: {controls} controls need {needed} spare bit(s), {available} available"
    )]
    InsufficientWorkspace {
        needed: usize,
        available: usize,
        controls: usize,
    },

    /// Two operand roles share a bit.
    #[error("Bit {bit} is used by more than one operand")]
    DuplicateBit { bit: BitId },

    /// No registered rule accepts the request.
    #[error("No decomposition rule for {op} with {controls} controls and {spare_bits} spare bits")]
    NoMatchingRule {
        op: ArithmeticOp,
        controls: usize,
        spare_bits: usize,
    },

    /// Arithmetic operations never merge with one another.
    #[error("Cannot merge {first} with {second}")]
    NotMergeable {
        first: ArithmeticOp,
        second: ArithmeticOp,
    },

    /// Options could not be parsed.
    #[error("Invalid synthesis options: {0}")]
    InvalidOptions(String),

    /// Circuit error during gate emission.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Inversion scope error.
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
