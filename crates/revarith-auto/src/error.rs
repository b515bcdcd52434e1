//! Error types for scoped inversion.

use revarith_ir::IrError;
use thiserror::Error;

/// Errors that can occur while closing an inversion scope.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScopeError {
    /// The circuit lost instructions that were emitted before the scope opened.
    #[error("Scope underflow: scope opened at {start} instructions, circuit now has {current}")]
    ScopeUnderflow {
        /// Instruction count recorded when the scope began.
        start: usize,
        /// Instruction count when the scope was closed.
        current: usize,
    },

    /// The inverted body could not be appended to the circuit.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;
