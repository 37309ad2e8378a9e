//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! The pipeline borrows the CPU mutably for one cycle at a time, so the Execute
//! stage is the only writer of architectural state.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::LoadError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::{CycleReport, Pipeline, PipelineState};
use crate::sim::assembler::Program;
use crate::sim::observer::{NullObserver, Observer};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Cycles executed.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// `false` when the cycle limit stopped the run first.
    pub halted: bool,
}

/// Top-level simulator: CPU architectural state + pipeline.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    /// CPU architectural state (registers, memories, stats).
    pub cpu: Cpu,
    /// Three-stage pipeline.
    pub pipeline: Pipeline,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Creates a new simulator with seeded registers and the configured cycle limit.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            pipeline: Pipeline::new(),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Replaces the cycle limit.
    pub const fn set_max_cycles(&mut self, max_cycles: Option<u64>) {
        self.max_cycles = max_cycles;
    }

    /// Loads an assembled program and resets the pipeline to fetch from address 0.
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if the program exceeds instruction memory.
    pub fn load(&mut self, program: &Program) -> Result<(), LoadError> {
        self.load_words(&program.words)
    }

    /// Loads raw instruction words; see [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// [`LoadError::TooLarge`] if `words` exceeds instruction memory.
    pub fn load_words(&mut self, words: &[u16]) -> Result<(), LoadError> {
        self.cpu.load_program(words)?;
        self.pipeline.flush();
        Ok(())
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> CycleReport {
        self.pipeline.tick(&mut self.cpu)
    }

    /// Returns `true` once the pipeline has drained after the end of the program.
    pub fn is_halted(&self) -> bool {
        self.pipeline.state() == PipelineState::Halted
    }

    /// Runs until the pipeline halts or the cycle limit is reached.
    pub fn run(&mut self) -> RunSummary {
        self.run_observed(&mut NullObserver)
    }

    /// Runs like [`run`](Self::run), reporting every cycle to `observer`.
    pub fn run_observed(&mut self, observer: &mut dyn Observer) -> RunSummary {
        info!(
            program_len = self.cpu.imem.program_len(),
            "starting pipelined execution"
        );

        while !self.is_halted() {
            let cycle = self.pipeline.cycle();
            if self.max_cycles.is_some_and(|limit| cycle >= limit) {
                warn!(cycles = cycle, pc = self.cpu.pc, "cycle limit reached before halt");
                break;
            }
            let report = self.tick();
            observer.on_cycle(&self.cpu, &report);
        }

        let summary = RunSummary {
            cycles: self.pipeline.cycle(),
            instructions_retired: self.cpu.stats.instructions_retired,
            halted: self.is_halted(),
        };
        observer.on_halt(&self.cpu, &summary);
        summary
    }
}
