//! The high-level arithmetic operation tag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SynthError, SynthResult};

/// A high-level in-place arithmetic operation on two registers.
///
/// The tag carries no behavior; synthesis dispatches on it in
/// [`crate::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// `target += input`.
    Add,
    /// `target -= input`.
    Subtract,
}

impl ArithmeticOp {
    /// Get the name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "subtract",
        }
    }

    /// The operation that undoes this one on the same registers.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            ArithmeticOp::Add => ArithmeticOp::Subtract,
            ArithmeticOp::Subtract => ArithmeticOp::Add,
        }
    }

    /// Arithmetic operations are never fused with a neighbour, not even an
    /// identical one.
    pub fn try_merge(self, other: ArithmeticOp) -> SynthResult<ArithmeticOp> {
        Err(SynthError::NotMergeable {
            first: self,
            second: other,
        })
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
