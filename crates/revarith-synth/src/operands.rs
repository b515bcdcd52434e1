//! Operand checks shared by the synthesizers.

use revarith_ir::BitId;
use rustc_hash::FxHashSet;

use crate::error::{SynthError, SynthResult};

/// Fail if any bit appears twice across (or within) the given operand lists.
pub(crate) fn ensure_disjoint<'a>(
    operands: impl IntoIterator<Item = &'a [BitId]>,
) -> SynthResult<()> {
    let mut seen = FxHashSet::default();
    for &bit in operands.into_iter().flatten() {
        if !seen.insert(bit) {
            return Err(SynthError::DuplicateBit { bit });
        }
    }
    Ok(())
}
