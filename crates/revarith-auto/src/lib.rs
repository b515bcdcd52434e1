//! Automatic inversion for revarith reversible circuits.
//!
//! Subtraction is never written by hand: it is addition run backwards. This
//! crate provides the machinery for that, as an explicit recording
//! combinator rather than a global engine flag.
//!
//! - [`InverseScope`] - marks a position in a circuit; closing it replaces
//!   everything emitted since with its inverse
//! - [`dagger`] - runs a closure inside a scope, all-or-nothing
//! - Gate inversion utilities for reversing instructions
//!
//! # Example
//!
//! ```ignore
//! use revarith_auto::dagger;
//!
//! // Emits the exact inverse of the addition circuit.
//! dagger(&mut circuit, |c| add_same_size_no_controls(c, &input, &target))?;
//! ```

mod error;
mod inverse;
mod scope;

pub use error::{ScopeError, ScopeResult};
pub use inverse::{inverse_gate, inverse_instruction, inverse_sequence, is_self_inverse};
pub use scope::{InverseScope, dagger};
