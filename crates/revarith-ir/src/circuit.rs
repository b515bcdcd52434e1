//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::bit::BitId;
use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::instruction::Instruction;
use crate::register::BitRegister;

/// A reversible circuit: an ordered sequence of primitive instructions.
///
/// The circuit is only a record of emitted gates in program order; nothing
/// here executes them. It also hands out fresh bit handles so callers can
/// lay out registers before asking a synthesizer to fill in gates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Emitted instructions, in program order.
    instructions: Vec<Instruction>,
    /// Counter for generating bit IDs.
    next_bit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: vec![],
            next_bit_id: 0,
        }
    }

    /// Create a circuit with `num_bits` bits already allocated.
    pub fn with_bits(name: impl Into<String>, num_bits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.next_bit_id = num_bits;
        circuit
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits handed out so far.
    pub fn num_bits(&self) -> usize {
        self.next_bit_id as usize
    }

    /// Allocate a single bit.
    ///
    /// Fails once every `u32` handle below `u32::MAX` has been handed out.
    pub fn add_bit(&mut self) -> IrResult<BitId> {
        let id = BitId(self.next_bit_id);
        self.next_bit_id = bit_count_after(id)?;
        Ok(id)
    }

    /// Allocate a labelled register of `size` consecutive bits.
    ///
    /// Either every bit is allocated or, on overflow, none is.
    pub fn add_register(
        &mut self,
        label: impl Into<String>,
        size: usize,
    ) -> IrResult<BitRegister> {
        let start = self.next_bit_id;
        let end = u32::try_from(size)
            .ok()
            .and_then(|size| start.checked_add(size))
            .ok_or(IrError::BitIdOverflow {
                bit: BitId(u32::MAX),
            })?;
        self.next_bit_id = end;
        Ok(BitRegister::from_bits((start..end).map(BitId)).with_label(label))
    }

    // =========================================================================
    // Primitive gates
    // =========================================================================

    /// Apply a controlled-NOT.
    pub fn cnot(&mut self, control: BitId, target: BitId) -> IrResult<&mut Self> {
        self.push(Instruction::cnot(control, target)?)
    }

    /// Apply a controlled-SWAP of `a` and `b`.
    pub fn cswap(&mut self, control: BitId, a: BitId, b: BitId) -> IrResult<&mut Self> {
        self.push(Instruction::cswap(control, a, b)?)
    }

    /// Flip every target when all controls are 1.
    pub fn multi_cnot(
        &mut self,
        controls: impl IntoIterator<Item = BitId>,
        targets: impl IntoIterator<Item = BitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::multi_cnot(controls, targets)?)
    }

    /// Flip every target.
    pub fn invert_all(&mut self, targets: impl IntoIterator<Item = BitId>) -> IrResult<&mut Self> {
        self.push(Instruction::invert_all(targets)?)
    }

    /// Append an instruction after validating it.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        instruction.validate()?;
        self.next_bit_id = self.bit_count_with(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append a batch of instructions, e.g. a replayed buffer tail.
    ///
    /// Every instruction is validated first; on error nothing is appended.
    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<()> {
        let batch: Vec<_> = instructions.into_iter().collect();
        let mut next_bit_id = self.next_bit_id;
        for instruction in &batch {
            instruction.validate()?;
            next_bit_id = next_bit_id.max(self.bit_count_with(instruction)?);
        }
        self.next_bit_id = next_bit_id;
        self.instructions.extend(batch);
        Ok(())
    }

    /// Bit count needed to cover every handle `instruction` uses.
    fn bit_count_with(&self, instruction: &Instruction) -> IrResult<u32> {
        match instruction.bits().max() {
            Some(max) => Ok(self.next_bit_id.max(bit_count_after(max)?)),
            None => Ok(self.next_bit_id),
        }
    }

    // =========================================================================
    // Buffer access
    // =========================================================================

    /// The emitted instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions in program order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Number of emitted instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check if no instruction was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Drop every instruction past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.instructions.truncate(len);
    }

    /// Remove and return the instructions from `at` onwards.
    ///
    /// Returns an empty vector if `at` is past the end.
    pub fn split_off(&mut self, at: usize) -> Vec<Instruction> {
        if at >= self.instructions.len() {
            return vec![];
        }
        self.instructions.split_off(at)
    }

    /// Count instructions per gate kind.
    pub fn count_ops(&self) -> FxHashMap<GateKind, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Number of bits a circuit needs to include `bit`.
fn bit_count_after(bit: BitId) -> IrResult<u32> {
    bit.0.checked_add(1).ok_or(IrError::BitIdOverflow { bit })
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
