//! Controlled addition using one borrowed dirty bit.
//!
//! The target is widened by a spare bit `d` of unknown value, and the
//! uncontrolled adder runs twice on the widened register with a controlled
//! complement after each pass:
//!
//! ```text
//! x -> x + a -> NOT(x + a) -> NOT(x + a) + a = NOT x -> x        (a control is 0)
//! x -> x + a -> x + a      -> x + 2a                             (all controls 1)
//! ```
//!
//! Adding `2a` to `[d] ++ target` leaves `d` alone and adds `a` to the
//! target, so the spare bit is returned exactly as it was found.

use revarith_auto::dagger;
use revarith_ir::{BitId, BitRegister, Circuit};
use tracing::debug;

use crate::adder::add_same_size_no_controls;
use crate::error::{SynthError, SynthResult};
use crate::operands::ensure_disjoint;
use crate::options::SynthOptions;
use crate::sizing::{add_no_controls, fit_input};

/// Emit `target += input (mod 2^len(target))`, conditioned on every bit in
/// `controls` being 1.
///
/// With no controls this is [`add_no_controls`] and `spare` is ignored.
/// Otherwise the first bit of `spare` is borrowed; it may hold any value
/// and is restored.
///
/// A controlled request on an empty `target` emits nothing and succeeds
/// without looking at `input` or `spare`, since there is no register to
/// update.
pub fn add(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
    spare: &[BitId],
    controls: &[BitId],
    options: &SynthOptions,
) -> SynthResult<()> {
    let Some(&first_control) = controls.first() else {
        return add_no_controls(circuit, input, target, options);
    };
    if target.is_empty() {
        debug!("Controlled addition into an empty target emits nothing");
        return Ok(());
    }
    let Some(&dirty) = spare.first() else {
        return Err(SynthError::InsufficientWorkspace {
            needed: 1,
            available: 0,
            controls: controls.len(),
        });
    };
    fit_input(input, target, options)?;

    let n = target.len();
    let used_input = input.truncated(n + 1);
    ensure_disjoint([used_input.bits(), target.bits(), &[dirty][..], controls])?;

    let expanded = target.with_bit_prepended(dirty);
    // The addend's top bit has weight 2^(n+1) after doubling, so any bit that
    // the adder restores will do. Borrow a control when the input has no
    // spare high bit of its own.
    let addend = if used_input.len() > n {
        used_input
    } else {
        used_input.with_bit_appended(first_control)
    };
    debug!(
        "Emitting {}-controlled {n}-bit addition, dirty bit {dirty}",
        controls.len()
    );

    for _ in 0..2 {
        add_same_size_no_controls(circuit, &addend, &expanded)?;
        circuit.multi_cnot(controls.iter().copied(), expanded.iter())?;
        circuit.invert_all(expanded.iter())?;
    }
    Ok(())
}

/// Emit `target -= input (mod 2^len(target))`, conditioned on every bit in
/// `controls` being 1. The exact inverse of [`add`].
///
/// As with [`add`], an empty `target` with controls emits nothing and
/// succeeds.
pub fn subtract(
    circuit: &mut Circuit,
    input: &BitRegister,
    target: &BitRegister,
    spare: &[BitId],
    controls: &[BitId],
    options: &SynthOptions,
) -> SynthResult<()> {
    dagger(circuit, |c| add(c, input, target, spare, controls, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OversizedInput;
    use revarith_ir::GateKind;
    use revarith_sim::BitState;

    struct Layout {
        circuit: Circuit,
        input: BitRegister,
        target: BitRegister,
        dirty: BitId,
        controls: Vec<BitId>,
    }

    fn layout(input_len: usize, target_len: usize, num_controls: usize) -> Layout {
        let mut circuit = Circuit::new("controlled");
        let input = circuit.add_register("a", input_len).unwrap();
        let target = circuit.add_register("b", target_len).unwrap();
        let dirty = circuit.add_bit().unwrap();
        let controls = circuit.add_register("c", num_controls).unwrap().bits().to_vec();
        Layout {
            circuit,
            input,
            target,
            dirty,
            controls,
        }
    }

    #[test]
    fn test_instruction_count() {
        for n in 1..=5 {
            let mut l = layout(n, n, 2);
            add(
                &mut l.circuit,
                &l.input,
                &l.target,
                &[l.dirty],
                &l.controls,
                &SynthOptions::default(),
            )
            .unwrap();
            assert_eq!(l.circuit.num_ops(), 8 * n + 10);

            let counts = l.circuit.count_ops();
            assert_eq!(counts[&GateKind::InvertAll], 2);
        }
    }

    #[test]
    fn test_gating_exhaustive_small() {
        let n = 3;
        for controls_value in 0..4u64 {
            for dirty_value in [false, true] {
                let mut l = layout(n, n, 2);
                add(
                    &mut l.circuit,
                    &l.input,
                    &l.target,
                    &[l.dirty],
                    &l.controls,
                    &SynthOptions::default(),
                )
                .unwrap();

                let controls = BitRegister::from_bits(l.controls.iter().copied());
                let mut state = BitState::for_circuit(&l.circuit);
                state.set_register(&l.input, 3).unwrap();
                state.set_register(&l.target, 6).unwrap();
                state.set_register(&controls, controls_value).unwrap();
                state.set(l.dirty, dirty_value).unwrap();
                state.run(&l.circuit).unwrap();

                let expected = if controls_value == 0b11 { (6 + 3) % 8 } else { 6 };
                assert_eq!(state.register_value(&l.target).unwrap(), expected);
                assert_eq!(state.register_value(&l.input).unwrap(), 3);
                assert_eq!(state.register_value(&controls).unwrap(), controls_value);
                assert_eq!(state.get(l.dirty).unwrap(), dirty_value);
            }
        }
    }

    #[test]
    fn test_oversized_input_uses_its_own_high_bit() {
        let mut l = layout(6, 3, 1);
        add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[l.dirty],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap();
        let control = l.controls[0];
        // The control only appears as a MultiCnot control, never in the adder.
        assert!(
            l.circuit
                .iter()
                .filter(|i| i.kind != GateKind::MultiCnot || !i.controls.contains(&control))
                .all(|i| i.bits().all(|b| b != control))
        );

        let mut state = BitState::for_circuit(&l.circuit);
        state.set_register(&l.input, 0b101_110).unwrap();
        state.set_register(&l.target, 4).unwrap();
        state.set(control, true).unwrap();
        state.run(&l.circuit).unwrap();
        assert_eq!(state.register_value(&l.target).unwrap(), (4 + 6) % 8);
        assert_eq!(state.register_value(&l.input).unwrap(), 0b101_110);
    }

    #[test]
    fn test_subtract_undoes_add() {
        let mut l = layout(4, 4, 1);
        let opts = SynthOptions::default();
        add(&mut l.circuit, &l.input, &l.target, &[l.dirty], &l.controls, &opts).unwrap();
        let split = l.circuit.num_ops();
        subtract(&mut l.circuit, &l.input, &l.target, &[l.dirty], &l.controls, &opts).unwrap();
        assert_eq!(l.circuit.num_ops(), 2 * split);

        let mut state = BitState::for_circuit(&l.circuit);
        state.set_register(&l.input, 11).unwrap();
        state.set_register(&l.target, 9).unwrap();
        state.set(l.controls[0], true).unwrap();
        state.set(l.dirty, true).unwrap();
        let before = state.clone();
        state.run(&l.circuit).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_controls_delegates() {
        let mut l = layout(3, 3, 0);
        add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[],
            &[],
            &SynthOptions::default(),
        )
        .unwrap();
        assert_eq!(l.circuit.num_ops(), 4 * 3 - 1);
    }

    #[test]
    fn test_empty_target_is_noop() {
        let mut l = layout(2, 0, 1);
        add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap();
        assert!(l.circuit.is_empty());

        subtract(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap();
        assert!(l.circuit.is_empty());
    }

    #[test]
    fn test_missing_spare_bit() {
        let mut l = layout(3, 3, 2);
        let err = add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SynthError::InsufficientWorkspace {
                needed: 1,
                available: 0,
                controls: 2
            }
        );
        assert!(l.circuit.is_empty());
    }

    #[test]
    fn test_shorter_input_and_reject_policy() {
        let mut l = layout(2, 3, 1);
        let err = add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[l.dirty],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SynthError::UnsupportedConfiguration { .. }));

        let mut l = layout(4, 3, 1);
        let reject = SynthOptions::new().with_oversized_input(OversizedInput::Reject);
        let err = add(&mut l.circuit, &l.input, &l.target, &[l.dirty], &l.controls, &reject)
            .unwrap_err();
        assert!(matches!(err, SynthError::OversizedInput { .. }));
        assert!(l.circuit.is_empty());
    }

    #[test]
    fn test_dirty_bit_inside_target_rejected() {
        let mut l = layout(3, 3, 1);
        let overlapping = l.target.bits()[1];
        let err = add(
            &mut l.circuit,
            &l.input,
            &l.target,
            &[overlapping],
            &l.controls,
            &SynthOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, SynthError::DuplicateBit { bit: overlapping });
        assert!(l.circuit.is_empty());
    }
}
