//! Simulation observers.
//!
//! An [`Observer`] is notified after every cycle and once when a run ends.
//! Observers only read state; the CLI uses one to print the per-cycle trace.

use crate::core::Cpu;
use crate::sim::simulator::RunSummary;

pub use crate::core::pipeline::{CycleReport, PipelineState, Retired};

/// Receives simulation events. Both methods default to doing nothing.
pub trait Observer {
    /// Called after each cycle with the state at the end of that cycle.
    fn on_cycle(&mut self, cpu: &Cpu, report: &CycleReport) {
        let _ = (cpu, report);
    }

    /// Called once when a run stops, whether halted or cut off.
    fn on_halt(&mut self, cpu: &Cpu, summary: &RunSummary) {
        let _ = (cpu, summary);
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Observer that keeps every cycle report.
#[derive(Clone, Debug, Default)]
pub struct CycleRecorder {
    /// Reports in cycle order.
    pub reports: Vec<CycleReport>,
    /// Summary of the finished run.
    pub summary: Option<RunSummary>,
}

impl Observer for CycleRecorder {
    fn on_cycle(&mut self, _cpu: &Cpu, report: &CycleReport) {
        self.reports.push(*report);
    }

    fn on_halt(&mut self, _cpu: &Cpu, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}
