//! Decomposition rules for high-level arithmetic requests.
//!
//! A request names an operation and the registers it acts on. The rule set
//! picks the first rule that accepts the request's shape and lets it emit
//! primitive gates into a circuit.

use revarith_ir::{BitId, BitRegister, Circuit, IrError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::controlled;
use crate::error::{SynthError, SynthResult};
use crate::op::ArithmeticOp;
use crate::options::SynthOptions;
use crate::sizing;

/// An arithmetic operation applied to concrete bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticRequest {
    /// The operation to perform.
    pub op: ArithmeticOp,
    /// The addend. Left unchanged.
    pub input: BitRegister,
    /// The register updated in place.
    pub target: BitRegister,
    /// The operation only takes effect when all of these are 1.
    #[serde(default)]
    pub controls: Vec<BitId>,
    /// Bits the synthesizer may borrow and must restore.
    #[serde(default)]
    pub spare: Vec<BitId>,
}

impl ArithmeticRequest {
    /// Create an uncontrolled request with no spare bits.
    pub fn new(op: ArithmeticOp, input: BitRegister, target: BitRegister) -> Self {
        Self {
            op,
            input,
            target,
            controls: vec![],
            spare: vec![],
        }
    }

    /// Set the control bits.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = BitId>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// Set the spare bits.
    #[must_use]
    pub fn with_spare(mut self, spare: impl IntoIterator<Item = BitId>) -> Self {
        self.spare = spare.into_iter().collect();
        self
    }

    /// The request that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            op: self.op.inverse(),
            ..self.clone()
        }
    }

    /// One past the highest bit index this request mentions.
    pub fn num_bits(&self) -> usize {
        self.input
            .iter()
            .chain(self.target.iter())
            .chain(self.controls.iter().copied())
            .chain(self.spare.iter().copied())
            .map(|b| b.index() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A way of lowering one shape of arithmetic request to primitive gates.
pub trait DecompositionRule: Send + Sync {
    /// Get the name of this rule.
    fn name(&self) -> &str;

    /// The operation this rule lowers.
    fn op(&self) -> ArithmeticOp;

    /// Largest number of controls accepted, or `None` for any number.
    fn max_controls(&self) -> Option<usize>;

    /// Number of spare bits the rule borrows.
    fn spare_bits_required(&self) -> usize;

    /// Emit the gates for `request`.
    fn decompose(
        &self,
        circuit: &mut Circuit,
        request: &ArithmeticRequest,
        options: &SynthOptions,
    ) -> SynthResult<()>;

    /// Check whether this rule accepts the request's operation and shape.
    fn matches(&self, request: &ArithmeticRequest) -> bool {
        request.op == self.op()
            && self
                .max_controls()
                .is_none_or(|max| request.controls.len() <= max)
            && request.spare.len() >= self.spare_bits_required()
    }
}

/// Lowers any number of controls by borrowing one dirty bit.
#[derive(Debug, Clone, Copy)]
pub struct DirtyControlledRule {
    op: ArithmeticOp,
}

impl DirtyControlledRule {
    /// Create the rule for `op`.
    pub fn new(op: ArithmeticOp) -> Self {
        Self { op }
    }
}

impl DecompositionRule for DirtyControlledRule {
    fn name(&self) -> &str {
        match self.op {
            ArithmeticOp::Add => "addition-dirty-controlled",
            ArithmeticOp::Subtract => "subtraction-dirty-controlled",
        }
    }

    fn op(&self) -> ArithmeticOp {
        self.op
    }

    fn max_controls(&self) -> Option<usize> {
        None
    }

    fn spare_bits_required(&self) -> usize {
        1
    }

    fn decompose(
        &self,
        circuit: &mut Circuit,
        request: &ArithmeticRequest,
        options: &SynthOptions,
    ) -> SynthResult<()> {
        let emit = match self.op {
            ArithmeticOp::Add => controlled::add,
            ArithmeticOp::Subtract => controlled::subtract,
        };
        emit(
            circuit,
            &request.input,
            &request.target,
            &request.spare,
            &request.controls,
            options,
        )
    }
}

/// Lowers uncontrolled requests without borrowing anything.
#[derive(Debug, Clone, Copy)]
pub struct UncontrolledRule {
    op: ArithmeticOp,
}

impl UncontrolledRule {
    /// Create the rule for `op`.
    pub fn new(op: ArithmeticOp) -> Self {
        Self { op }
    }
}

impl DecompositionRule for UncontrolledRule {
    fn name(&self) -> &str {
        match self.op {
            ArithmeticOp::Add => "addition-uncontrolled",
            ArithmeticOp::Subtract => "subtraction-uncontrolled",
        }
    }

    fn op(&self) -> ArithmeticOp {
        self.op
    }

    fn max_controls(&self) -> Option<usize> {
        Some(0)
    }

    fn spare_bits_required(&self) -> usize {
        0
    }

    fn decompose(
        &self,
        circuit: &mut Circuit,
        request: &ArithmeticRequest,
        options: &SynthOptions,
    ) -> SynthResult<()> {
        match self.op {
            ArithmeticOp::Add => {
                sizing::add_no_controls(circuit, &request.input, &request.target, options)
            }
            ArithmeticOp::Subtract => {
                sizing::subtract_no_controls(circuit, &request.input, &request.target, options)
            }
        }
    }
}

/// An ordered collection of decomposition rules.
pub struct RuleSet {
    /// Rules in priority order.
    rules: Vec<Box<dyn DecompositionRule>>,
    /// Options handed to every rule.
    options: SynthOptions,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self {
            rules: vec![],
            options: SynthOptions::default(),
        }
    }

    /// The four standard rules: dirty-controlled and uncontrolled, for
    /// addition and subtraction.
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.add_rule(DirtyControlledRule::new(ArithmeticOp::Add));
        set.add_rule(UncontrolledRule::new(ArithmeticOp::Add));
        set.add_rule(DirtyControlledRule::new(ArithmeticOp::Subtract));
        set.add_rule(UncontrolledRule::new(ArithmeticOp::Subtract));
        set
    }

    /// Replace the options passed to the rules.
    #[must_use]
    pub fn with_options(mut self, options: SynthOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the options passed to the rules.
    pub fn options(&self) -> &SynthOptions {
        &self.options
    }

    /// Append a rule. Earlier rules take priority.
    pub fn add_rule(&mut self, rule: impl DecompositionRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Find the first rule accepting `request`.
    ///
    /// When a rule would accept the request's operation and controls but the
    /// request lends too few spare bits, the error is
    /// [`SynthError::InsufficientWorkspace`] for the least demanding such rule.
    pub fn find(&self, request: &ArithmeticRequest) -> SynthResult<&dyn DecompositionRule> {
        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(request)) {
            return Ok(rule.as_ref());
        }

        let controls = request.controls.len();
        let needed = self
            .rules
            .iter()
            .filter(|rule| {
                rule.op() == request.op && rule.max_controls().is_none_or(|max| controls <= max)
            })
            .map(|rule| rule.spare_bits_required())
            .min();
        match needed {
            Some(needed) => Err(SynthError::InsufficientWorkspace {
                needed,
                available: request.spare.len(),
                controls,
            }),
            None => Err(SynthError::NoMatchingRule {
                op: request.op,
                controls,
                spare_bits: request.spare.len(),
            }),
        }
    }

    /// Lower `request` into `circuit`.
    ///
    /// On error the circuit is left exactly as it was.
    #[instrument(skip(self, circuit, request), fields(op = %request.op))]
    pub fn apply(&self, circuit: &mut Circuit, request: &ArithmeticRequest) -> SynthResult<()> {
        let rule = self.find(request)?;
        debug!("Applying rule: {}", rule.name());

        let start = circuit.num_ops();
        if let Err(e) = rule.decompose(circuit, request, &self.options) {
            circuit.truncate(start);
            return Err(e);
        }

        info!(
            "Rule {} emitted {} instructions",
            rule.name(),
            circuit.num_ops() - start
        );
        Ok(())
    }

    /// Lower `request` into a fresh circuit wide enough for its bits.
    pub fn synthesize(&self, request: &ArithmeticRequest) -> SynthResult<Circuit> {
        // Only a request naming the largest handle overflows the bit count.
        let num_bits = u32::try_from(request.num_bits()).map_err(|_| IrError::BitIdOverflow {
            bit: BitId(u32::MAX),
        })?;
        let mut circuit = Circuit::with_bits(
            format!("{}_{}", request.op, request.target.len()),
            num_bits,
        );
        self.apply(&mut circuit, request)?;
        Ok(circuit)
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the rules in priority order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(op: ArithmeticOp, controls: usize, spare: usize) -> (Circuit, ArithmeticRequest) {
        let mut circuit = Circuit::new("rules");
        let input = circuit.add_register("a", 3).unwrap();
        let target = circuit.add_register("b", 3).unwrap();
        let controls = circuit.add_register("c", controls).unwrap();
        let spare = circuit.add_register("s", spare).unwrap();
        let request = ArithmeticRequest::new(op, input, target)
            .with_controls(controls.iter())
            .with_spare(spare.iter());
        (circuit, request)
    }

    #[test]
    fn test_standard_order() {
        let rules = RuleSet::standard();
        assert_eq!(rules.len(), 4);
        let names: Vec<_> = rules.rule_names().collect();
        assert_eq!(
            names,
            vec![
                "addition-dirty-controlled",
                "addition-uncontrolled",
                "subtraction-dirty-controlled",
                "subtraction-uncontrolled",
            ]
        );
    }

    #[test]
    fn test_rule_selection() {
        let rules = RuleSet::standard();

        let (_, req) = request(ArithmeticOp::Add, 0, 0);
        assert_eq!(rules.find(&req).unwrap().name(), "addition-uncontrolled");

        let (_, req) = request(ArithmeticOp::Subtract, 2, 1);
        assert_eq!(
            rules.find(&req).unwrap().name(),
            "subtraction-dirty-controlled"
        );

        // A spare bit makes the dirty-controlled rule eligible even without
        // controls; it comes first.
        let (_, req) = request(ArithmeticOp::Add, 0, 1);
        assert_eq!(rules.find(&req).unwrap().name(), "addition-dirty-controlled");
    }

    #[test]
    fn test_controls_without_spare_bit() {
        let rules = RuleSet::standard();
        let (mut circuit, req) = request(ArithmeticOp::Add, 1, 0);
        let err = rules.apply(&mut circuit, &req).unwrap_err();
        assert_eq!(
            err,
            SynthError::InsufficientWorkspace {
                needed: 1,
                available: 0,
                controls: 1
            }
        );
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_no_matching_rule() {
        let (_, req) = request(ArithmeticOp::Subtract, 1, 0);

        let empty = RuleSet::new();
        assert!(empty.is_empty());
        assert_eq!(
            empty.find(&req).err(),
            Some(SynthError::NoMatchingRule {
                op: ArithmeticOp::Subtract,
                controls: 1,
                spare_bits: 0
            })
        );

        let mut additions = RuleSet::new();
        additions.add_rule(DirtyControlledRule::new(ArithmeticOp::Add));
        additions.add_rule(UncontrolledRule::new(ArithmeticOp::Add));
        assert!(matches!(
            additions.find(&req),
            Err(SynthError::NoMatchingRule { .. })
        ));

        let mut uncontrolled = RuleSet::new();
        uncontrolled.add_rule(UncontrolledRule::new(ArithmeticOp::Subtract));
        assert!(matches!(
            uncontrolled.find(&req),
            Err(SynthError::NoMatchingRule { controls: 1, .. })
        ));
    }

    #[test]
    fn test_apply_counts() {
        let rules = RuleSet::standard();

        let (mut circuit, req) = request(ArithmeticOp::Add, 0, 0);
        rules.apply(&mut circuit, &req).unwrap();
        assert_eq!(circuit.num_ops(), 11);

        let (mut circuit, req) = request(ArithmeticOp::Subtract, 1, 1);
        rules.apply(&mut circuit, &req).unwrap();
        assert_eq!(circuit.num_ops(), 34);
    }

    #[test]
    fn test_failed_apply_leaves_circuit_unchanged() {
        let rules = RuleSet::standard();
        let (mut circuit, req) = request(ArithmeticOp::Add, 0, 0);
        rules.apply(&mut circuit, &req).unwrap();
        let before = circuit.clone();

        let bad = ArithmeticRequest::new(
            ArithmeticOp::Add,
            req.input.truncated(2),
            req.target.clone(),
        );
        assert!(rules.apply(&mut circuit, &bad).is_err());
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_synthesize_sizes_circuit() {
        let (_, req) = request(ArithmeticOp::Add, 2, 1);
        let circuit = RuleSet::standard().synthesize(&req).unwrap();
        assert_eq!(circuit.num_bits(), 9);
        assert_eq!(circuit.name(), "add_3");
        assert_eq!(circuit.num_ops(), 34);
    }

    #[test]
    fn test_synthesize_largest_handle_rejected() {
        let input = BitRegister::from_bits([BitId(0)]);
        let target = BitRegister::from_bits([BitId(u32::MAX)]);
        let req = ArithmeticRequest::new(ArithmeticOp::Add, input, target);
        assert_eq!(
            RuleSet::standard().synthesize(&req).err(),
            Some(SynthError::Ir(IrError::BitIdOverflow {
                bit: BitId(u32::MAX)
            }))
        );
    }

    #[test]
    fn test_request_json() {
        let json = r#"{
            "op": "Subtract",
            "input": {"bits": [0, 1], "label": "a"},
            "target": {"bits": [2, 3], "label": null},
            "controls": [4]
        }"#;
        let req: ArithmeticRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.op, ArithmeticOp::Subtract);
        assert_eq!(req.controls, vec![BitId(4)]);
        assert!(req.spare.is_empty());
        assert_eq!(req.inverse().op, ArithmeticOp::Add);
        assert_eq!(req.num_bits(), 5);
    }

    #[test]
    fn test_options_reach_rules() {
        use crate::options::OversizedInput;

        let rules = RuleSet::standard()
            .with_options(SynthOptions::new().with_oversized_input(OversizedInput::Reject));
        let mut circuit = Circuit::new("opts");
        let input = circuit.add_register("a", 4).unwrap();
        let target = circuit.add_register("b", 2).unwrap();
        let req = ArithmeticRequest::new(ArithmeticOp::Add, input, target);
        assert!(matches!(
            rules.apply(&mut circuit, &req),
            Err(SynthError::OversizedInput { .. })
        ));
    }
}
