//! Reversible Adder Demo
//!
//! Synthesizes an in-place addition or subtraction with no clean ancillas,
//! then checks it on concrete values.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use revarith_demos::scenario::AdderScenario;
use revarith_demos::{print_failure, print_header, print_result, print_section, print_success};
use revarith_synth::{ArithmeticOp, RuleSet, SynthOptions};

#[derive(Parser, Debug)]
#[command(name = "demo-adder")]
#[command(about = "Synthesize and verify an ancilla-free reversible adder")]
struct Args {
    /// Target register width
    #[arg(short = 'n', long, default_value = "4")]
    bits: usize,

    /// Input register width (defaults to the target width)
    #[arg(long)]
    input_bits: Option<usize>,

    /// Input value
    #[arg(short = 'a', long, default_value = "5")]
    input: u64,

    /// Starting target value
    #[arg(short = 'b', long, default_value = "2")]
    target: u64,

    /// Number of control bits
    #[arg(short, long, default_value = "0")]
    controls: usize,

    /// Control assignment (defaults to all ones)
    #[arg(long)]
    control_value: Option<u64>,

    /// Start the borrowed dirty bit at 1
    #[arg(long)]
    dirty: bool,

    /// Subtract instead of add
    #[arg(short, long)]
    subtract: bool,

    /// Synthesis options as a JSON file
    #[arg(long, env = "REVARITH_OPTIONS")]
    options: Option<PathBuf>,

    /// Print every emitted instruction
    #[arg(long)]
    show_circuit: bool,

    /// Print the circuit as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_options(path: Option<&PathBuf>) -> Result<SynthOptions> {
    let Some(path) = path else {
        return Ok(SynthOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading options from {}", path.display()))?;
    Ok(SynthOptions::from_json(&text)?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let options = load_options(args.options.as_ref())?;
    let rules = RuleSet::standard().with_options(options);

    let op = if args.subtract {
        ArithmeticOp::Subtract
    } else {
        ArithmeticOp::Add
    };
    let mut scenario = AdderScenario::new(args.bits)
        .with_input_bits(args.input_bits.unwrap_or(args.bits))
        .with_controls(args.controls)
        .with_op(op)
        .with_values(args.input, args.target)
        .with_dirty(args.dirty);
    if let Some(value) = args.control_value {
        scenario = scenario.with_control_value(value);
    }

    print_header("Ancilla-Free Reversible Adder Demo");

    print_section("Problem Setup");
    print_result("Operation", op);
    print_result("Target width", scenario.bits);
    print_result("Input width", scenario.input_bits);
    print_result("Controls", scenario.num_controls);
    print_result(
        "Truncation",
        format!("{:?}", rules.options().oversized_input),
    );

    print_section("Synthesis");
    let prepared = scenario.prepare(&rules)?;
    let circuit = &prepared.circuit;
    print_result("Rule", &prepared.rule);
    print_result("Bits", circuit.num_bits());
    print_result("Instructions", circuit.num_ops());
    let mut histogram: Vec<_> = circuit.count_ops().into_iter().collect();
    histogram.sort_by_key(|(kind, _)| kind.name());
    for (kind, count) in histogram {
        print_result(&format!("  {kind}"), count);
    }
    if let Some(dirty) = prepared.dirty {
        print_result("Dirty bit", dirty);
    }

    if args.show_circuit {
        print_section("Instructions");
        for (i, inst) in circuit.iter().enumerate() {
            println!("  {i:4}  {inst}");
        }
    }

    if args.json {
        print_section("Circuit JSON");
        println!("{}", serde_json::to_string_pretty(circuit)?);
    }

    print_section("Simulation");
    let outcome = scenario.run(&prepared)?;
    print_result("Input", scenario.input_value);
    print_result("Target before", scenario.target_value);
    print_result("Target after", outcome.target);
    print_result("Expected", outcome.expected);
    print_result("Input restored", outcome.input_restored);
    print_result("Workspace restored", outcome.workspace_restored);

    println!();
    if outcome.is_correct() {
        print_success("Circuit verified");
        Ok(())
    } else {
        print_failure("Circuit produced the wrong result");
        anyhow::bail!("verification failed")
    }
}
