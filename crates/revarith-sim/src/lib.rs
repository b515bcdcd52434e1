//! Classical simulation of revarith reversible circuits.
//!
//! Every primitive gate maps a classical bit assignment to another classical
//! bit assignment, so circuits can be checked exactly on concrete integers
//! without a statevector.
//!
//! # Example
//!
//! ```rust
//! use revarith_ir::Circuit;
//! use revarith_sim::BitState;
//!
//! let mut circuit = Circuit::new("copy");
//! let a = circuit.add_register("a", 2).unwrap();
//! let b = circuit.add_register("b", 2).unwrap();
//! for (x, y) in a.iter().zip(b.iter()) {
//!     circuit.cnot(x, y).unwrap();
//! }
//!
//! let mut state = BitState::for_circuit(&circuit);
//! state.set_register(&a, 3).unwrap();
//! state.run(&circuit).unwrap();
//! assert_eq!(state.register_value(&b).unwrap(), 3);
//! ```

mod error;
mod state;

pub use error::{SimError, SimResult};
pub use state::BitState;
