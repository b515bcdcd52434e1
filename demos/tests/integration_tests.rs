//! Integration tests for the demo scenarios.
//!
//! These run the full path the binary takes: rule selection, synthesis,
//! and classical verification.

use revarith_demos::scenario::AdderScenario;
use revarith_synth::{ArithmeticOp, OversizedInput, RuleSet, SynthOptions};

/// The worked example: 5 + 2 = 7 in three bits, then back to 2.
#[test]
fn test_five_plus_two_round_trip() {
    let rules = RuleSet::standard();

    let add = AdderScenario::new(3).with_values(5, 2);
    let outcome = add.run(&add.prepare(&rules).unwrap()).unwrap();
    assert_eq!(outcome.target, 7);
    assert!(outcome.is_correct());

    let sub = AdderScenario::new(3)
        .with_op(ArithmeticOp::Subtract)
        .with_values(5, 7);
    let outcome = sub.run(&sub.prepare(&rules).unwrap()).unwrap();
    assert_eq!(outcome.target, 2);
    assert!(outcome.is_correct());
}

/// Every control assignment and dirty value for a small controlled adder.
#[test]
fn test_controlled_scenarios_exhaustive() {
    let rules = RuleSet::standard();
    for control_value in 0..8 {
        for dirty in [false, true] {
            let scenario = AdderScenario::new(4)
                .with_controls(3)
                .with_control_value(control_value)
                .with_dirty(dirty)
                .with_values(9, 12);
            let prepared = scenario.prepare(&rules).unwrap();
            assert_eq!(prepared.rule, "addition-dirty-controlled");
            assert_eq!(prepared.circuit.num_ops(), 8 * 4 + 10);

            let outcome = scenario.run(&prepared).unwrap();
            assert!(outcome.is_correct(), "controls {control_value:03b}, dirty {dirty}");
        }
    }
}

/// The truncation example: an 8-bit input into a 4-bit target.
#[test]
fn test_truncated_input() {
    let scenario = AdderScenario::new(4)
        .with_input_bits(8)
        .with_values(214, 3);
    let prepared = scenario.prepare(&RuleSet::standard()).unwrap();
    let outcome = scenario.run(&prepared).unwrap();
    assert_eq!(outcome.target, 9);
    assert!(outcome.is_correct());

    let strict = RuleSet::standard()
        .with_options(SynthOptions::new().with_oversized_input(OversizedInput::Reject));
    assert!(scenario.prepare(&strict).is_err());
}

/// A narrower input cannot be synthesized.
#[test]
fn test_narrow_input_fails() {
    let scenario = AdderScenario::new(4).with_input_bits(3);
    assert!(scenario.prepare(&RuleSet::standard()).is_err());
}
