//! Gate inversion utilities.

use revarith_ir::{GateKind, Instruction};

/// Compute the inverse of a primitive gate kind.
///
/// Every primitive permutation used here is an involution:
///
/// - CNOT applied twice restores the target
/// - CSWAP applied twice restores both swapped bits
/// - A multi-controlled NOT flips the same targets under the same condition
/// - A global NOT applied twice restores every bit
pub fn inverse_gate(kind: GateKind) -> GateKind {
    match kind {
        GateKind::Cnot => GateKind::Cnot,
        GateKind::CSwap => GateKind::CSwap,
        GateKind::MultiCnot => GateKind::MultiCnot,
        GateKind::InvertAll => GateKind::InvertAll,
    }
}

/// Check if a gate kind is self-inverse.
pub fn is_self_inverse(kind: GateKind) -> bool {
    inverse_gate(kind) == kind
}

/// Compute the inverse of an instruction.
///
/// Operands are kept in place; only the gate kind is inverted.
pub fn inverse_instruction(instruction: &Instruction) -> Instruction {
    Instruction {
        kind: inverse_gate(instruction.kind),
        controls: instruction.controls.clone(),
        targets: instruction.targets.clone(),
    }
}

/// Invert a sequence of instructions: reverse the order, invert each one.
pub fn inverse_sequence<'a>(
    instructions: impl IntoIterator<Item = &'a Instruction, IntoIter: DoubleEndedIterator>,
) -> Vec<Instruction> {
    instructions
        .into_iter()
        .rev()
        .map(inverse_instruction)
        .collect()
}
