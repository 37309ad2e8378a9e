//! Pipeline controller.
//!
//! This module owns the three stage slots and advances them once per cycle. Each
//! [`Pipeline::tick`] performs, in order:
//! 1. **Flush:** Applies a redirect requested by the previous cycle's Execute stage.
//! 2. **Execute:** Executes and retires the instruction in the ID/EX slot.
//! 3. **Decode:** Promotes the IF/ID slot into ID/EX.
//! 4. **Fetch:** Fills the IF/ID slot from instruction memory while fetch is armed.
//! 5. **State Update:** Moves between `Running`, `Draining` and `Halted`.
//!
//! Stages are serviced back to front, so an instruction spends exactly one
//! cycle in each stage and a flush discards at most two younger instructions.
//!
//! Fetch is never re-armed once it has seen the end of the program. A redirect
//! that retires after that point only squashes and moves the PC, and one still
//! pending when the stages empty is dropped at halt.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::Cpu;
use crate::core::pipeline::hazards::{self, FlushRequest};
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::stages::{
    ExecutionOutcome, decode_stage, execute_stage, fetch_stage, retire,
};

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    /// Fetch is still producing instructions.
    #[default]
    Running,
    /// The end of the program was reached; older instructions are still in flight.
    Draining,
    /// The end of the program was reached and every stage is empty.
    Halted,
}

/// An instruction that left the Execute stage, with its effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Retired {
    /// The retired instruction.
    pub entry: IdExEntry,
    /// What it did.
    pub outcome: ExecutionOutcome,
}

/// Everything that happened in one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Redirect applied at the start of the cycle.
    pub flush: Option<FlushRequest>,
    /// Instructions discarded by that redirect.
    pub squashed: u64,
    /// Instruction executed and retired this cycle.
    pub retired: Option<Retired>,
    /// Instruction promoted from Decode into Execute.
    pub promoted: Option<IdExEntry>,
    /// Instruction fetched into Decode; `None` means no instruction was fetched.
    pub fetched: Option<IfIdEntry>,
    /// Controller state at the end of the cycle.
    pub state: PipelineState,
}

/// The three-stage pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    fetch_armed: bool,
    decode: Option<IfIdEntry>,
    execute: Option<IdExEntry>,
    flush: Option<FlushRequest>,
    end_of_program: bool,
    cycle: u64,
    state: PipelineState,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates an empty pipeline ready to fetch from the CPU's current PC.
    pub const fn new() -> Self {
        Self {
            fetch_armed: true,
            decode: None,
            execute: None,
            flush: None,
            end_of_program: false,
            cycle: 0,
            state: PipelineState::Running,
        }
    }

    /// Run one cycle of the entire pipeline.
    ///
    /// Ticking a halted pipeline does nothing and reports the same cycle number.
    pub fn tick(&mut self, cpu: &mut Cpu) -> CycleReport {
        if self.state == PipelineState::Halted {
            return CycleReport {
                cycle: self.cycle,
                flush: None,
                squashed: 0,
                retired: None,
                promoted: None,
                fetched: None,
                state: self.state,
            };
        }

        self.cycle += 1;
        cpu.stats.cycles += 1;

        let flush = self.flush.take();
        let mut squashed = 0;
        if let Some(req) = flush {
            squashed = hazards::squash(&mut self.decode, &mut self.execute);
            cpu.pc = req.target;
            cpu.stats.flushes += 1;
            cpu.stats.squashed += squashed;
            debug!(
                cycle = self.cycle,
                from = req.source_pc,
                to = req.target,
                squashed,
                "pipeline flush"
            );
        }

        let retired = self.execute.take().map(|entry| {
            let outcome = execute_stage(cpu, &entry);
            retire(cpu, &entry, &outcome);
            if let Some(target) = outcome.control_transfer {
                self.flush = Some(FlushRequest {
                    target,
                    source_pc: entry.pc,
                });
            }
            Retired { entry, outcome }
        });
        if retired.is_none() {
            cpu.stats.bubbles += 1;
        }

        self.execute = self.decode.take().map(|entry| decode_stage(&entry));

        let mut fetched = None;
        if self.fetch_armed {
            fetched = fetch_stage(cpu);
            if fetched.is_none() {
                self.fetch_armed = false;
                self.end_of_program = true;
            }
            self.decode = fetched;
        }

        self.state = if !self.end_of_program {
            PipelineState::Running
        } else if self.is_empty() {
            if let Some(req) = &self.flush {
                debug!(
                    from = req.source_pc,
                    to = req.target,
                    "redirect dropped, fetch already ended"
                );
            }
            info!(
                cycles = self.cycle,
                retired = cpu.stats.instructions_retired,
                "pipeline halted"
            );
            PipelineState::Halted
        } else {
            PipelineState::Draining
        };

        CycleReport {
            cycle: self.cycle,
            flush,
            squashed,
            retired,
            promoted: self.execute,
            fetched,
            state: self.state,
        }
    }

    /// Empties every stage and re-arms fetch, as before the first cycle.
    pub fn flush(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` when neither Decode nor Execute holds an instruction.
    ///
    /// A pending redirect does not count as an instruction in flight.
    pub const fn is_empty(&self) -> bool {
        self.decode.is_none() && self.execute.is_none()
    }

    /// Current controller state.
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Number of cycles executed so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether fetch will read instruction memory next cycle.
    pub const fn fetch_armed(&self) -> bool {
        self.fetch_armed
    }

    /// The IF/ID slot.
    pub const fn decode_slot(&self) -> Option<&IfIdEntry> {
        self.decode.as_ref()
    }

    /// The ID/EX slot.
    pub const fn execute_slot(&self) -> Option<&IdExEntry> {
        self.execute.as_ref()
    }

    /// The redirect that will be applied next cycle.
    pub const fn pending_flush(&self) -> Option<&FlushRequest> {
        self.flush.as_ref()
    }
}
