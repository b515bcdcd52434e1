//! Error types for the simulator.

use revarith_ir::{BitId, IrError};
use thiserror::Error;

/// Errors that can occur during simulation.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    /// An instruction or register refers to a bit outside the state.
    #[error("Bit {bit} out of range for a state of {num_bits} bits")]
    BitOutOfRange {
        /// The offending bit.
        bit: BitId,
        /// Size of the simulated state.
        num_bits: usize,
    },

    /// Register too wide to be read as a `u64`.
    #[error("Register of {width} bits does not fit in 64 bits")]
    RegisterTooWide {
        /// Width of the register.
        width: usize,
    },

    /// Value does not fit in the register it is written to.
    #[error("Value {value} does not fit in a {width}-bit register")]
    ValueTooWide {
        /// The value being written.
        value: u64,
        /// Width of the register.
        width: usize,
    },

    /// An instruction's operands do not fit its gate kind.
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(#[from] IrError),
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
