//! Primitive reversible gate kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The primitive operations a reversible circuit is built from.
///
/// Each one permutes the classical bit-state space and is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Controlled-NOT: one control, one target.
    Cnot,
    /// Controlled-SWAP (Fredkin): one control, two swapped targets.
    CSwap,
    /// NOT on every target, fired when all controls are 1.
    ///
    /// With a single control this is the multi-target CNOT; with several it
    /// is the multi-controlled global NOT.
    MultiCnot,
    /// Unconditional NOT on every target.
    InvertAll,
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Cnot => "cnot",
            GateKind::CSwap => "cswap",
            GateKind::MultiCnot => "mcnot",
            GateKind::InvertAll => "not_all",
        }
    }

    /// Required number of control bits, or `None` if any count is accepted.
    pub fn num_controls(&self) -> Option<usize> {
        match self {
            GateKind::Cnot | GateKind::CSwap => Some(1),
            GateKind::MultiCnot => None,
            GateKind::InvertAll => Some(0),
        }
    }

    /// Required number of target bits, or `None` if any count is accepted.
    pub fn num_targets(&self) -> Option<usize> {
        match self {
            GateKind::Cnot => Some(1),
            GateKind::CSwap => Some(2),
            GateKind::MultiCnot | GateKind::InvertAll => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
