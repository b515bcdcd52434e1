//! Increment by one with a borrowed dirty register.

use revarith_ir::{BitRegister, Circuit};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::operands::ensure_disjoint;
use crate::options::SynthOptions;
use crate::sizing::subtract_no_controls;

/// Emit `target += 1 (mod 2^len(target))`.
///
/// `dirty` must be at least as wide as `target`. Its value is arbitrary and
/// restored on exit. The construction uses `NOT v = -v - 1`:
///
/// ```text
/// t - v  ->  t - v - (-v - 1)  =  t + 1
/// ```
pub fn increment_with_dirty(
    circuit: &mut Circuit,
    target: &BitRegister,
    dirty: &BitRegister,
    options: &SynthOptions,
) -> SynthResult<()> {
    if target.is_empty() {
        return Ok(());
    }
    if dirty.len() < target.len() {
        return Err(SynthError::UnsupportedConfiguration {
            reason: "dirty register shorter than target",
            input_len: dirty.len(),
            target_len: target.len(),
        });
    }
    ensure_disjoint([target.bits(), dirty.bits()])?;
    debug!(
        "Emitting {}-bit increment with {} dirty bits",
        target.len(),
        dirty.len()
    );

    let start = circuit.num_ops();
    if let Err(e) = emit_increment(circuit, target, dirty, options) {
        circuit.truncate(start);
        return Err(e);
    }
    Ok(())
}

fn emit_increment(
    circuit: &mut Circuit,
    target: &BitRegister,
    dirty: &BitRegister,
    options: &SynthOptions,
) -> SynthResult<()> {
    for _ in 0..2 {
        subtract_no_controls(circuit, dirty, target, options)?;
        circuit.invert_all(dirty.iter())?;
    }
    Ok(())
}
