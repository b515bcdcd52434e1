//! A single arithmetic scenario: registers, values, and the expected result.

use anyhow::{Context, Result, ensure};
use revarith_ir::{BitId, BitRegister, Circuit};
use revarith_sim::BitState;
use revarith_synth::{ArithmeticOp, ArithmeticRequest, RuleSet};
use tracing::debug;

/// Widest target the demo can check with `u64` arithmetic.
pub const MAX_BITS: usize = 63;

/// Register widths, operation and starting values for one run.
#[derive(Debug, Clone)]
pub struct AdderScenario {
    /// Target width.
    pub bits: usize,
    /// Input width; at least `bits`.
    pub input_bits: usize,
    /// Number of control bits.
    pub num_controls: usize,
    /// Operation to synthesize.
    pub op: ArithmeticOp,
    /// Starting input value.
    pub input_value: u64,
    /// Starting target value.
    pub target_value: u64,
    /// Control assignment; `None` sets every control to 1.
    pub control_value: Option<u64>,
    /// Starting value of the borrowed dirty bit.
    pub dirty_value: bool,
}

/// A synthesized scenario, ready to simulate.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// The emitted circuit.
    pub circuit: Circuit,
    /// The request that produced it.
    pub request: ArithmeticRequest,
    /// Name of the rule that lowered the request.
    pub rule: String,
    /// Controls as a register, for setting and reading them together.
    pub controls: BitRegister,
    /// The dirty bit lent to controlled requests.
    pub dirty: Option<BitId>,
}

/// What the simulator observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Final target value.
    pub target: u64,
    /// Value the target should hold.
    pub expected: u64,
    /// The input register holds its starting value.
    pub input_restored: bool,
    /// The controls and dirty bit hold their starting values.
    pub workspace_restored: bool,
}

impl Outcome {
    /// Whether the circuit did exactly what was asked.
    pub fn is_correct(&self) -> bool {
        self.target == self.expected && self.input_restored && self.workspace_restored
    }
}

fn mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl AdderScenario {
    /// An uncontrolled `bits`-wide addition of zero into zero.
    pub fn new(bits: usize) -> Self {
        Self {
            bits,
            input_bits: bits,
            num_controls: 0,
            op: ArithmeticOp::Add,
            input_value: 0,
            target_value: 0,
            control_value: None,
            dirty_value: false,
        }
    }

    /// Set the input width.
    #[must_use]
    pub fn with_input_bits(mut self, input_bits: usize) -> Self {
        self.input_bits = input_bits;
        self
    }

    /// Set the number of controls.
    #[must_use]
    pub fn with_controls(mut self, num_controls: usize) -> Self {
        self.num_controls = num_controls;
        self
    }

    /// Set the operation.
    #[must_use]
    pub fn with_op(mut self, op: ArithmeticOp) -> Self {
        self.op = op;
        self
    }

    /// Set the starting input and target values.
    #[must_use]
    pub fn with_values(mut self, input: u64, target: u64) -> Self {
        self.input_value = input;
        self.target_value = target;
        self
    }

    /// Set the control assignment.
    #[must_use]
    pub fn with_control_value(mut self, value: u64) -> Self {
        self.control_value = Some(value);
        self
    }

    /// Set the dirty bit's starting value.
    #[must_use]
    pub fn with_dirty(mut self, value: bool) -> Self {
        self.dirty_value = value;
        self
    }

    fn controls_value(&self) -> u64 {
        self.control_value.unwrap_or(mask(self.num_controls))
    }

    /// The target value the circuit should produce.
    pub fn expected(&self) -> u64 {
        let gated = self.controls_value() == mask(self.num_controls);
        let addend = self.input_value & mask(self.bits);
        let result = match (gated, self.op) {
            (false, _) => self.target_value,
            (true, ArithmeticOp::Add) => self.target_value.wrapping_add(addend),
            (true, ArithmeticOp::Subtract) => self.target_value.wrapping_sub(addend),
        };
        result & mask(self.bits)
    }

    /// Lay out the registers and synthesize the request.
    pub fn prepare(&self, rules: &RuleSet) -> Result<Prepared> {
        ensure!(
            self.bits <= MAX_BITS && self.input_bits <= MAX_BITS,
            "registers wider than {MAX_BITS} bits cannot be simulated"
        );
        ensure!(
            self.num_controls <= MAX_BITS,
            "at most {MAX_BITS} controls are supported"
        );

        let mut circuit = Circuit::new(format!("{}_{}", self.op, self.bits));
        let input = circuit.add_register("input", self.input_bits)?;
        let target = circuit.add_register("target", self.bits)?;
        let controls = circuit.add_register("controls", self.num_controls)?;
        let dirty = (self.num_controls > 0)
            .then(|| circuit.add_bit())
            .transpose()?;

        let request = ArithmeticRequest::new(self.op, input, target)
            .with_controls(controls.iter())
            .with_spare(dirty);
        let rule = rules.find(&request)?.name().to_string();
        rules
            .apply(&mut circuit, &request)
            .with_context(|| format!("synthesizing with rule {rule}"))?;
        debug!("Prepared {} with {} instructions", circuit.name(), circuit.num_ops());

        Ok(Prepared {
            circuit,
            request,
            rule,
            controls,
            dirty,
        })
    }

    /// Simulate a prepared circuit on this scenario's values.
    pub fn run(&self, prepared: &Prepared) -> Result<Outcome> {
        let request = &prepared.request;
        let mut state = BitState::for_circuit(&prepared.circuit);
        state
            .set_register(&request.input, self.input_value)
            .context("setting input")?;
        state
            .set_register(&request.target, self.target_value)
            .context("setting target")?;
        state
            .set_register(&prepared.controls, self.controls_value())
            .context("setting controls")?;
        if let Some(dirty) = prepared.dirty {
            state.set(dirty, self.dirty_value)?;
        }

        state.run(&prepared.circuit)?;

        let dirty_restored = match prepared.dirty {
            Some(dirty) => state.get(dirty)? == self.dirty_value,
            None => true,
        };
        Ok(Outcome {
            target: state.register_value(&request.target)?,
            expected: self.expected(),
            input_restored: state.register_value(&request.input)? == self.input_value,
            workspace_restored: dirty_restored
                && state.register_value(&prepared.controls)? == self.controls_value(),
        })
    }
}
