//! Classical bit-state simulation engine.

use revarith_ir::{BitId, BitRegister, Circuit, GateKind, Instruction};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// The values of every bit in a circuit.
///
/// Reversible circuits built from the primitives in [`GateKind`] map basis
/// states to basis states, so a plain bit vector is an exact simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitState {
    /// One entry per bit, indexed by [`BitId::index`].
    bits: Vec<bool>,
}

impl BitState {
    /// Create a state of `num_bits` bits, all 0.
    pub fn new(num_bits: usize) -> Self {
        Self {
            bits: vec![false; num_bits],
        }
    }

    /// Create a state sized for every bit `circuit` has allocated.
    pub fn for_circuit(circuit: &Circuit) -> Self {
        Self::new(circuit.num_bits())
    }

    /// Get the number of bits.
    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    fn check(&self, bit: BitId) -> SimResult<usize> {
        let index = bit.index();
        if index >= self.bits.len() {
            return Err(SimError::BitOutOfRange {
                bit,
                num_bits: self.bits.len(),
            });
        }
        Ok(index)
    }

    /// Read one bit.
    pub fn get(&self, bit: BitId) -> SimResult<bool> {
        Ok(self.bits[self.check(bit)?])
    }

    /// Write one bit.
    pub fn set(&mut self, bit: BitId, value: bool) -> SimResult<()> {
        let index = self.check(bit)?;
        self.bits[index] = value;
        Ok(())
    }

    /// Write `value` into `register`, LSB first.
    pub fn set_register(&mut self, register: &BitRegister, value: u64) -> SimResult<()> {
        let width = register.len();
        if width < 64 && value >> width != 0 {
            return Err(SimError::ValueTooWide { value, width });
        }
        for bit in register.iter() {
            self.check(bit)?;
        }
        for (i, bit) in register.iter().enumerate() {
            let v = i < 64 && (value >> i) & 1 == 1;
            self.bits[bit.index()] = v;
        }
        Ok(())
    }

    /// Read `register` as an unsigned little-endian integer.
    pub fn register_value(&self, register: &BitRegister) -> SimResult<u64> {
        if register.len() > 64 {
            return Err(SimError::RegisterTooWide {
                width: register.len(),
            });
        }
        let mut value = 0u64;
        for (i, bit) in register.iter().enumerate() {
            if self.get(bit)? {
                value |= 1 << i;
            }
        }
        Ok(value)
    }

    fn check_instruction(&self, instruction: &Instruction) -> SimResult<()> {
        instruction.validate()?;
        for bit in instruction.bits() {
            self.check(bit)?;
        }
        Ok(())
    }

    /// Apply one instruction.
    ///
    /// Instructions with malformed operand lists are rejected with
    /// [`SimError::InvalidInstruction`].
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        self.check_instruction(instruction)?;

        let fires = instruction.controls.iter().all(|c| self.bits[c.index()]);
        if !fires {
            return Ok(());
        }

        match instruction.kind {
            GateKind::CSwap => {
                let a = instruction.targets[0].index();
                let b = instruction.targets[1].index();
                self.bits.swap(a, b);
            }
            GateKind::Cnot | GateKind::MultiCnot | GateKind::InvertAll => {
                for t in &instruction.targets {
                    self.bits[t.index()] ^= true;
                }
            }
        }
        Ok(())
    }

    /// Run every instruction of `circuit` in program order.
    ///
    /// Every instruction is validated and range-checked before the first
    /// gate is applied, so an error leaves the state untouched.
    pub fn run(&mut self, circuit: &Circuit) -> SimResult<()> {
        for inst in circuit {
            self.check_instruction(inst)?;
        }
        debug!(
            "Simulating circuit '{}' with {} ops on {} bits",
            circuit.name(),
            circuit.num_ops(),
            self.bits.len()
        );
        for inst in circuit {
            self.apply(inst)?;
        }
        Ok(())
    }
}
