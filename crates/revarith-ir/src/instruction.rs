//! Circuit instructions combining a gate kind with its operands.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bit::BitId;
use crate::error::{IrError, IrResult};
use crate::gate::GateKind;

/// A primitive gate applied to concrete bits.
///
/// The gate fires iff every bit in `controls` is 1. For [`GateKind::CSwap`]
/// the two `targets` are exchanged; for every other kind each target is
/// flipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of gate.
    pub kind: GateKind,
    /// Bits that must all be 1 for the gate to act.
    pub controls: Vec<BitId>,
    /// Bits acted upon.
    pub targets: Vec<BitId>,
}

impl Instruction {
    /// Create an instruction, checking operand counts and distinctness.
    pub fn new(
        kind: GateKind,
        controls: impl IntoIterator<Item = BitId>,
        targets: impl IntoIterator<Item = BitId>,
    ) -> IrResult<Self> {
        let inst = Self {
            kind,
            controls: controls.into_iter().collect(),
            targets: targets.into_iter().collect(),
        };
        inst.validate()?;
        Ok(inst)
    }

    /// Controlled-NOT of `target` by `control`.
    pub fn cnot(control: BitId, target: BitId) -> IrResult<Self> {
        Self::new(GateKind::Cnot, [control], [target])
    }

    /// Exchange `a` and `b` when `control` is 1.
    pub fn cswap(control: BitId, a: BitId, b: BitId) -> IrResult<Self> {
        Self::new(GateKind::CSwap, [control], [a, b])
    }

    /// Flip every target when all controls are 1.
    pub fn multi_cnot(
        controls: impl IntoIterator<Item = BitId>,
        targets: impl IntoIterator<Item = BitId>,
    ) -> IrResult<Self> {
        Self::new(GateKind::MultiCnot, controls, targets)
    }

    /// Flip every target unconditionally.
    pub fn invert_all(targets: impl IntoIterator<Item = BitId>) -> IrResult<Self> {
        Self::new(GateKind::InvertAll, [], targets)
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// All bits touched by this instruction, controls first.
    pub fn bits(&self) -> impl Iterator<Item = BitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Check operand counts against the gate kind and reject repeated bits.
    pub fn validate(&self) -> IrResult<()> {
        let gate_name = self.kind.name();
        if let Some(expected) = self.kind.num_controls() {
            if self.controls.len() != expected {
                return Err(IrError::BitCountMismatch {
                    gate_name: gate_name.to_string(),
                    role: "control",
                    expected,
                    got: self.controls.len(),
                });
            }
        }
        if let Some(expected) = self.kind.num_targets() {
            if self.targets.len() != expected {
                return Err(IrError::BitCountMismatch {
                    gate_name: gate_name.to_string(),
                    role: "target",
                    expected,
                    got: self.targets.len(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for bit in self.bits() {
            if !seen.insert(bit) {
                return Err(IrError::DuplicateBit {
                    bit,
                    gate_name: gate_name.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(bits: &[BitId]) -> String {
            bits.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
        write!(
            f,
            "{} [{}] -> [{}]",
            self.name(),
            join(&self.controls),
            join(&self.targets)
        )
    }
}
