//! Register size adaptation for uncontrolled addition.

use revarith_auto::dagger;
use revarith_ir::{BitRegister, Circuit};
use tracing::debug;

use crate::adder::add_same_size_no_controls;
use crate::error::{SynthError, SynthResult};
use crate::options::{OversizedInput, SynthOptions};

/// Bring `input` to `target`'s width, or explain why that is not possible.
pub(crate) fn fit_input(
    input: &BitRegister,
    target: &BitRegister,
    options: &SynthOptions,
) -> SynthResult<BitRegister> {
    let (input_len, target_len) = (input.len(), target.len());
    if input_len < target_len {
        // Widening the addend needs an ancilla strategy that does not exist yet.
        return Err(SynthError::UnsupportedConfiguration {
            reason: "input register shorter than target",
            input_len,
            target_len,
        });
    }
    if input_len > target_len {
        if options.oversized_input == OversizedInput::Reject {
            return Err(SynthError::OversizedInput {
                input_len,
                target_len,
            });
        }
        debug!("Truncating {input_len}-bit input to {target_len} bits");
    }
    Ok(input.truncated(target_len))
}

/// Emit `target += input (mod 2^len(target))` with no controls.
///
/// An input wider than the target is truncated to its low bits (unless the
/// options reject it). A narrower input is unsupported.
pub fn add_no_controls(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
    options: &SynthOptions,
) -> SynthResult<()> {
    let input = fit_input(input, target, options)?;
    add_same_size_no_controls(circuit, &input, target)
}

/// Emit `target -= input (mod 2^len(target))` with no controls.
pub fn subtract_no_controls(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
    options: &SynthOptions,
) -> SynthResult<()> {
    dagger(circuit, |c| add_no_controls(c, input, target, options))
}
