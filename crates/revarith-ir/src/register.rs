//! Bit registers.

use serde::{Deserialize, Serialize};

use crate::bit::BitId;

/// An ordered register of bits representing an unsigned integer.
///
/// Index 0 is the least significant bit. A register only names bits; it
/// neither allocates nor owns them, so slicing and concatenating registers
/// is free of side effects on any circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitRegister {
    /// The bits in this register, ordered from LSB to MSB.
    bits: Vec<BitId>,
    /// Label for this register (for debugging/printing).
    label: Option<String>,
}

impl BitRegister {
    /// Create a register from existing bits.
    pub fn from_bits(bits: impl IntoIterator<Item = BitId>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
            label: None,
        }
    }

    /// Create a register with a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of bits in this register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get the bits in this register.
    pub fn bits(&self) -> &[BitId] {
        &self.bits
    }

    /// Get a specific bit by index.
    pub fn bit(&self, index: usize) -> Option<BitId> {
        self.bits.get(index).copied()
    }

    /// Get the LSB.
    pub fn lsb(&self) -> Option<BitId> {
        self.bits.first().copied()
    }

    /// Get the MSB.
    pub fn msb(&self) -> Option<BitId> {
        self.bits.last().copied()
    }

    /// Get the label if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Split the register at an index, returning (lower, upper).
    pub fn split_at(&self, index: usize) -> (BitRegister, BitRegister) {
        let (lower, upper) = self.bits.split_at(index.min(self.bits.len()));
        (
            BitRegister::from_bits(lower.iter().copied()),
            BitRegister::from_bits(upper.iter().copied()),
        )
    }

    /// The low `len` bits of this register (the whole register if shorter).
    pub fn truncated(&self, len: usize) -> BitRegister {
        self.split_at(len).0
    }

    /// Concatenate two registers; `other` becomes the high part.
    pub fn concat(&self, other: &BitRegister) -> BitRegister {
        let mut bits = self.bits.clone();
        bits.extend(other.bits.iter().copied());
        BitRegister::from_bits(bits)
    }

    /// A copy of this register with `bit` inserted as the new LSB.
    pub fn with_bit_prepended(&self, bit: BitId) -> BitRegister {
        BitRegister::from_bits(std::iter::once(bit).chain(self.iter()))
    }

    /// A copy of this register with `bit` added as the new MSB.
    pub fn with_bit_appended(&self, bit: BitId) -> BitRegister {
        BitRegister::from_bits(self.iter().chain(std::iter::once(bit)))
    }

    /// Iterate over bits, LSB first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = BitId> + '_ {
        self.bits.iter().copied()
    }
}

impl From<Vec<BitId>> for BitRegister {
    fn from(bits: Vec<BitId>) -> Self {
        Self::from_bits(bits)
    }
}

impl IntoIterator for BitRegister {
    type Item = BitId;
    type IntoIter = std::vec::IntoIter<BitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitRegister {
    type Item = &'a BitId;
    type IntoIter = std::slice::Iter<'a, BitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}
