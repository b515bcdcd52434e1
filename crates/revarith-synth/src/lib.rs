//! Ancilla-free reversible addition and subtraction.
//!
//! This crate lowers in-place arithmetic on bit registers to the primitive
//! gates of [`revarith_ir`] without allocating any clean workspace:
//!
//! 1. **Same-size adder**: a linear-size ripple adder that borrows the
//!    input's top bit as its carry line ([`add_same_size_no_controls`])
//! 2. **Sizing**: wider inputs are truncated to the target's width
//!    ([`add_no_controls`])
//! 3. **Controls**: any number of controls via one borrowed dirty bit
//!    ([`add`])
//! 4. **Rules**: a table that routes an [`ArithmeticRequest`] to the right
//!    construction ([`RuleSet`])
//!
//! Subtraction is always the exact inverse of addition, built with
//! [`revarith_auto::dagger`].
//!
//! # Example
//!
//! ```rust
//! use revarith_ir::Circuit;
//! use revarith_synth::{ArithmeticOp, ArithmeticRequest, RuleSet};
//!
//! let mut circuit = Circuit::new("controlled_add");
//! let input = circuit.add_register("a", 4).unwrap();
//! let target = circuit.add_register("b", 4).unwrap();
//! let control = circuit.add_bit().unwrap();
//! let dirty = circuit.add_bit().unwrap();
//!
//! let request = ArithmeticRequest::new(ArithmeticOp::Add, input, target)
//!     .with_controls([control])
//!     .with_spare([dirty]);
//! RuleSet::standard().apply(&mut circuit, &request).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 8 * 4 + 10);
//! ```

mod adder;
mod controlled;
mod error;
mod increment;
mod op;
mod operands;
mod options;
mod rules;
mod sizing;

pub use adder::{add_same_size_no_controls, subtract_same_size_no_controls};
pub use controlled::{add, subtract};
pub use error::{SynthError, SynthResult};
pub use increment::increment_with_dirty;
pub use op::ArithmeticOp;
pub use options::{OversizedInput, SynthOptions};
pub use rules::{
    ArithmeticRequest, DecompositionRule, DirtyControlledRule, RuleSet, UncontrolledRule,
};
pub use sizing::{add_no_controls, subtract_no_controls};
