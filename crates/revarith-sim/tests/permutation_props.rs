//! Property-based tests for the bit-state simulator.
//!
//! Every primitive is an involution, so running a random circuit and then
//! the same instructions in reverse order must restore any starting state.

use proptest::prelude::*;
use revarith_ir::{BitId, Circuit, Instruction};
use revarith_sim::BitState;

const NUM_BITS: u32 = 6;

/// Generate a random primitive instruction over `NUM_BITS` bits.
fn arb_instruction() -> impl Strategy<Value = Instruction> {
    // A shuffled permutation of all bits gives distinct operands for free.
    (Just((0..NUM_BITS).collect::<Vec<_>>()).prop_shuffle(), 0_usize..4, 0_usize..3)
        .prop_map(|(bits, kind, split)| {
            let ids: Vec<BitId> = bits.into_iter().map(BitId).collect();
            let result = match kind {
                0 => Instruction::cnot(ids[0], ids[1]),
                1 => Instruction::cswap(ids[0], ids[1], ids[2]),
                2 => Instruction::multi_cnot(
                    ids[..split].iter().copied(),
                    ids[split..].iter().copied(),
                ),
                _ => Instruction::invert_all(ids[..split + 1].iter().copied()),
            };
            result.expect("distinct operands")
        })
}

proptest! {
    #[test]
    fn reversed_run_restores_state(
        ops in prop::collection::vec(arb_instruction(), 0..20),
        init in 0_u64..(1 << NUM_BITS),
    ) {
        let mut circuit = Circuit::with_bits("forward", NUM_BITS);
        circuit.extend(ops.iter().cloned()).unwrap();
        let mut undo = Circuit::with_bits("backward", NUM_BITS);
        undo.extend(ops.iter().rev().cloned()).unwrap();

        let all = revarith_ir::BitRegister::from_bits((0..NUM_BITS).map(BitId));
        let mut state = BitState::new(NUM_BITS as usize);
        state.set_register(&all, init).unwrap();

        state.run(&circuit).unwrap();
        state.run(&undo).unwrap();

        prop_assert_eq!(state.register_value(&all).unwrap(), init);
    }

    #[test]
    fn run_is_a_bijection(ops in prop::collection::vec(arb_instruction(), 1..10)) {
        let mut circuit = Circuit::with_bits("perm", NUM_BITS);
        circuit.extend(ops).unwrap();
        let all = revarith_ir::BitRegister::from_bits((0..NUM_BITS).map(BitId));

        let mut seen = vec![false; 1 << NUM_BITS];
        for init in 0..(1_u64 << NUM_BITS) {
            let mut state = BitState::new(NUM_BITS as usize);
            state.set_register(&all, init).unwrap();
            state.run(&circuit).unwrap();
            let out = state.register_value(&all).unwrap() as usize;
            prop_assert!(!seen[out], "two inputs mapped to {}", out);
            seen[out] = true;
        }
    }
}
