//! Harvard CPU pipeline simulator CLI.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Run:** Assemble a program file, run it through the pipeline, and print the final state.
//! 2. **Assemble:** Print the words a program file assembles to, with diagnostics.
//!
//! With no subcommand it runs `Test_Instructions.txt` with R1=5, R2=20, R3=100.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use harvsim_core::config::Config;
use harvsim_core::core::Cpu;
use harvsim_core::isa::disasm::disassemble;
use harvsim_core::sim::assembler::Program;
use harvsim_core::sim::loader;
use harvsim_core::sim::observer::{CycleReport, Observer};
use harvsim_core::sim::report::{ArchSnapshot, CycleTrace, StateReport};
use harvsim_core::sim::simulator::{RunSummary, Simulator};
use harvsim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "harvsim",
    author,
    version,
    about = "16-bit Harvard CPU pipeline simulator",
    long_about = "Assemble and run programs on a 16-bit Harvard CPU with a three-stage pipeline.\n\nExamples:\n  harvsim\n  harvsim run demos/countdown.txt --trace\n  harvsim run demos/countdown.txt --stats-sections summary,control\n  harvsim run prog.txt --config sim.json --json\n  harvsim asm prog.txt\n\nSet RUST_LOG=debug for internal logging."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and print the final state.
    Run {
        /// Program text file (defaults to the config's path, then `Test_Instructions.txt`).
        program: Option<PathBuf>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print every pipeline cycle.
        #[arg(short, long)]
        trace: bool,

        /// Print the final state as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Print run statistics after the final state.
        #[arg(long)]
        stats: bool,

        /// Comma-separated statistics sections to print; implies `--stats`.
        #[arg(
            long,
            value_delimiter = ',',
            value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
        )]
        stats_sections: Vec<String>,

        /// Stop after this many cycles if the program has not halted.
        #[arg(long)]
        max_cycles: Option<u64>,
    },

    /// Assemble a program and print its words and disassembly.
    Asm {
        /// Program text file.
        program: PathBuf,
    },
}

/// Options for one run, after merging flags over the config file.
#[derive(Debug)]
struct RunOptions {
    program: Option<PathBuf>,
    config: Option<PathBuf>,
    trace: bool,
    json: bool,
    stats: bool,
    stats_sections: Vec<String>,
    max_cycles: Option<u64>,
}

/// Prints each cycle as it happens.
#[derive(Debug)]
struct TraceObserver;

impl Observer for TraceObserver {
    fn on_cycle(&mut self, _cpu: &Cpu, report: &CycleReport) {
        println!("{}", CycleTrace(report));
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            program,
            config,
            trace,
            json,
            stats,
            stats_sections,
            max_cycles,
        }) => cmd_run(&RunOptions {
            program,
            config,
            trace,
            json,
            stats,
            stats_sections,
            max_cycles,
        }),
        Some(Commands::Asm { program }) => cmd_asm(&program),
        None => cmd_run(&RunOptions {
            program: None,
            config: None,
            trace: false,
            json: false,
            stats: false,
            stats_sections: Vec::new(),
            max_cycles: None,
        }),
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Prints the assembler's diagnostics to stderr.
fn print_diagnostics(program: &Program) {
    for error in &program.errors {
        eprintln!("error: {error}");
    }
    for warning in &program.warnings {
        eprintln!("warning: {warning}");
    }
}

/// Loads, runs, and reports one program.
fn cmd_run(opts: &RunOptions) -> ExitCode {
    let mut config = match &opts.config {
        Some(path) => match Config::from_json_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(path) = &opts.program {
        config.program.path.clone_from(path);
    }
    config.general.trace |= opts.trace;
    if opts.max_cycles.is_some() {
        config.general.max_cycles = opts.max_cycles;
    }

    let path = &config.program.path;
    let program = match loader::load_program(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    print_diagnostics(&program);

    let mut sim = Simulator::new(&config);
    if let Err(e) = sim.load(&program) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if !opts.json {
        println!("Harvard Architecture CPU Simulator (pipelined)");
        println!("----------------------------------------------\n");
        for (addr, word) in program.words.iter().enumerate() {
            println!("Loaded instruction at {addr}: {word:#06X}");
        }
        println!(
            "Loaded {} instructions from {}\n",
            program.len(),
            path.display()
        );
        println!("Starting program execution (pipelined mode)...\n");
    }

    let summary = if config.general.trace && !opts.json {
        sim.run_observed(&mut TraceObserver)
    } else {
        sim.run()
    };

    if opts.json {
        return print_json(&sim, &summary);
    }

    report_summary(&summary);
    println!("{}", StateReport(&sim.cpu));
    if opts.stats || !opts.stats_sections.is_empty() {
        sim.cpu.stats.print_sections(&opts.stats_sections);
    }
    ExitCode::SUCCESS
}

fn report_summary(summary: &RunSummary) {
    if summary.halted {
        println!(
            "Program execution completed after {} clock cycles.\n",
            summary.cycles
        );
    } else {
        println!(
            "Program execution stopped at the cycle limit ({} clock cycles).\n",
            summary.cycles
        );
    }
}

fn print_json(sim: &Simulator, summary: &RunSummary) -> ExitCode {
    let out = serde_json::json!({
        "summary": summary,
        "state": ArchSnapshot::capture(&sim.cpu),
    });
    match serde_json::to_string_pretty(&out) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Assembles a program and lists the result.
fn cmd_asm(path: &Path) -> ExitCode {
    let program = match loader::load_program(path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (addr, (word, line)) in program.words.iter().zip(&program.lines).enumerate() {
        println!("{addr:4}: {word:#06X}  {:<16} ; line {line}", disassemble(*word));
    }
    print_diagnostics(&program);
    ExitCode::SUCCESS
}
