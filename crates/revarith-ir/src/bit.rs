//! Bit handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a bit within a circuit.
///
/// Handles are opaque to the synthesizers: they never look at the value a
/// bit holds, only at where it sits in a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BitId(pub u32);

impl BitId {
    /// Index of this bit in a dense state vector.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

impl From<u32> for BitId {
    fn from(id: u32) -> Self {
        BitId(id)
    }
}
