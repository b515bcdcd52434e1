//! revarith Reversible Circuit Intermediate Representation
//!
//! This crate provides the core data structures for describing reversible
//! (bit-permutation) circuits. It forms the foundation of the revarith
//! synthesis stack.
//!
//! # Core Components
//!
//! - **Bits**: [`BitId`] opaque handles, [`BitRegister`] little-endian registers
//! - **Gates**: [`GateKind`] for the four primitives (CNOT, CSWAP,
//!   multi-controlled NOT, global NOT)
//! - **Instructions**: [`Instruction`] combining a gate with its control and
//!   target bits
//! - **Circuit**: [`Circuit`] ordered instruction buffer and bit allocator
//!
//! # Example: Building a Swap from CNOTs
//!
//! ```rust
//! use revarith_ir::Circuit;
//!
//! let mut circuit = Circuit::new("swap");
//! let a = circuit.add_bit().unwrap();
//! let b = circuit.add_bit().unwrap();
//!
//! circuit.cnot(a, b).unwrap();
//! circuit.cnot(b, a).unwrap();
//! circuit.cnot(a, b).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Controls | Targets | Action |
//! |------|----------|---------|--------|
//! | `cnot` | 1 | 1 | flip target if control is 1 |
//! | `cswap` | 1 | 2 | swap targets if control is 1 |
//! | `mcnot` | any | any | flip all targets if all controls are 1 |
//! | `not_all` | 0 | any | flip all targets |

pub mod bit;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod register;

pub use bit::BitId;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::GateKind;
pub use instruction::Instruction;
pub use register::BitRegister;
