//! Error types for the IR crate.

use crate::bit::BitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// A bit appears more than once among an instruction's operands.
    #[error("Duplicate bit {bit} in operation (gate: {gate_name})")]
    DuplicateBit {
        /// The duplicated bit.
        bit: BitId,
        /// Name of the gate being built.
        gate_name: String,
    },

    /// Gate requires a different number of operands.
    #[error("Gate '{gate_name}' requires {expected} {role} bits, got {got}")]
    BitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Which operand list was wrong ("control" or "target").
        role: &'static str,
        /// Expected number of bits.
        expected: usize,
        /// Actual number of bits provided.
        got: usize,
    },

    /// A bit handle leaves no room for the bit count in a `u32`.
    #[error("Bit {bit} exceeds the largest supported bit handle")]
    BitIdOverflow {
        /// The offending handle.
        bit: BitId,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
