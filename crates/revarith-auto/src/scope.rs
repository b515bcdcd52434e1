//! Scoped inversion ("dagger") of emitted instructions.

use revarith_ir::Circuit;
use tracing::trace;

use crate::error::{ScopeError, ScopeResult};
use crate::inverse::inverse_sequence;

/// Marks a point in a circuit's instruction buffer.
///
/// Everything emitted after [`InverseScope::begin`] is the scope's body.
/// Closing the scope with [`InverseScope::finish`] replaces the body with its
/// exact inverse: the same instructions in reverse order, each replaced by
/// its inverse.
#[derive(Debug)]
#[must_use = "an open scope does nothing until finished or abandoned"]
pub struct InverseScope {
    /// Instruction count when the scope was opened.
    start: usize,
    /// Label for this scope (debugging).
    label: Option<String>,
}

impl InverseScope {
    /// Open a scope at the current end of `circuit`.
    pub fn begin(circuit: &Circuit) -> Self {
        Self {
            start: circuit.num_ops(),
            label: None,
        }
    }

    /// Add a label to this scope (for debugging).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the starting instruction count.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the label if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replace the scope body with its inverse.
    pub fn finish(self, circuit: &mut Circuit) -> ScopeResult<()> {
        let current = circuit.num_ops();
        if current < self.start {
            return Err(ScopeError::ScopeUnderflow {
                start: self.start,
                current,
            });
        }

        let body = circuit.split_off(self.start);
        trace!(
            label = self.label.as_deref().unwrap_or(""),
            ops = body.len(),
            "inverting scope body"
        );
        circuit.extend(inverse_sequence(&body))?;
        Ok(())
    }

    /// Discard the scope body, leaving the circuit as it was at `begin`.
    pub fn abandon(self, circuit: &mut Circuit) {
        circuit.truncate(self.start);
    }
}

/// Run `body` and emit the inverse of whatever it emitted.
///
/// If `body` fails, nothing it emitted is kept and its error is returned.
///
/// # Example
///
/// ```rust
/// use revarith_auto::{dagger, ScopeError};
/// use revarith_ir::Circuit;
///
/// let mut circuit = Circuit::new("undo");
/// let a = circuit.add_bit().unwrap();
/// let b = circuit.add_bit().unwrap();
/// let c = circuit.add_bit().unwrap();
///
/// dagger(&mut circuit, |c2| -> Result<(), ScopeError> {
///     c2.cnot(a, b).unwrap();
///     c2.cswap(b, a, c).unwrap();
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(circuit.instructions()[0].name(), "cswap");
/// assert_eq!(circuit.instructions()[1].name(), "cnot");
/// ```
pub fn dagger<E, F>(circuit: &mut Circuit, body: F) -> Result<(), E>
where
    F: FnOnce(&mut Circuit) -> Result<(), E>,
    E: From<ScopeError>,
{
    let scope = InverseScope::begin(circuit);
    match body(circuit) {
        Ok(()) => scope.finish(circuit).map_err(E::from),
        Err(err) => {
            scope.abandon(circuit);
            Err(err)
        }
    }
}
