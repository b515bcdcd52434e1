//! Ancilla-free ripple adder for equal-length registers.
//!
//! Builds the linear-size construction of Takahashi and Kunihiro, "A
//! linear-size quantum circuit for addition with no ancillary qubits"
//! (2005), with the MSB of the input borrowed as the carry line. The carry
//! line may start in any state: the first and last phases correct for it,
//! so it ends holding exactly what it held on entry.
//!
//! For `n` bits the circuit has `4n - 1` instructions and touches no bit
//! outside the two registers.

use revarith_auto::dagger;
use revarith_ir::{BitRegister, Circuit};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::operands::ensure_disjoint;

fn check_same_size(input: &BitRegister, target: &BitRegister) -> SynthResult<()> {
    if input.len() != target.len() {
        return Err(SynthError::LengthMismatch {
            input_len: input.len(),
            target_len: target.len(),
        });
    }
    ensure_disjoint([input.bits(), target.bits()])
}

/// Emit `target += input (mod 2^n)` for registers of equal length `n`.
///
/// `input` is used as workspace but is restored exactly.
pub fn add_same_size_no_controls(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
) -> SynthResult<()> {
    check_same_size(input, target)?;
    let (low_input, carry) = input.split_at(input.len().saturating_sub(1));
    let Some(carry) = carry.lsb() else {
        return Ok(());
    };
    let n = target.len();
    debug!("Emitting {n}-bit ripple adder, carry line {carry}");

    let a = low_input.bits();
    let b = target.bits();
    let dirty_fixup = low_input.concat(target);

    // (1) Cancel the carry line's unknown starting value.
    circuit.multi_cnot([carry], dirty_fixup.iter().rev())?;

    // (2) Ripple forward.
    for i in 0..n - 1 {
        circuit.cnot(carry, b[i])?;
        circuit.cswap(b[i], carry, a[i])?;
    }

    // (3) Top sum bit.
    circuit.cnot(carry, b[n - 1])?;

    // (4) Ripple backward, restoring the input.
    for i in (0..n - 1).rev() {
        circuit.cswap(b[i], carry, a[i])?;
        circuit.cnot(a[i], b[i])?;
    }

    // (5) Undo step (1).
    circuit.multi_cnot([carry], dirty_fixup.iter())?;

    Ok(())
}

/// Emit `target -= input (mod 2^n)` for registers of equal length `n`.
///
/// This is the structural inverse of [`add_same_size_no_controls`].
pub fn subtract_same_size_no_controls(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
) -> SynthResult<()> {
    check_same_size(input, target)?;
    dagger(circuit, |c| add_same_size_no_controls(c, input, target))
}
