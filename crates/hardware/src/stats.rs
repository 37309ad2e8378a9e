//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for a simulation run. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, unknown).
//! 3. **Control flow:** Taken branches, pipeline flushes, and squashed instructions.
//! 4. **Bubbles:** Cycles in which nothing retired.

use std::time::Instant;

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired, including unknown opcodes.
    pub instructions_retired: u64,

    /// Count of ALU instructions retired (ADD, SUB, MUL, MOVI, ANDI, EOR, SAL, SAR).
    pub inst_alu: u64,
    /// Count of LDR instructions retired.
    pub inst_load: u64,
    /// Count of STR instructions retired.
    pub inst_store: u64,
    /// Count of BEQZ and BR instructions retired.
    pub inst_branch: u64,
    /// Count of reserved opcodes (12-15) retired as no-ops.
    pub unknown_opcodes: u64,

    /// Branches and jumps that redirected fetch.
    pub branches_taken: u64,
    /// Pipeline flushes applied.
    pub flushes: u64,
    /// Wrong-path instructions discarded by flushes.
    pub squashed: u64,
    /// Cycles in which the Execute stage was empty.
    pub bubbles: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            unknown_opcodes: 0,
            branches_taken: 0,
            flushes: 0,
            squashed: 0,
            bubbles: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"control"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "control"];

/// Percentage of `part` in `whole`, with an empty `whole` counting as 1.
fn pct(part: u64, whole: u64) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

impl SimStats {
    /// Instructions retired per cycle, or 0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"instruction_mix"`,
    /// or `"control"`. Pass an empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);
        let mut out = String::new();
        let mut line = |s: String| {
            out.push_str(&s);
            out.push('\n');
        };

        line("\n==========================================================".into());
        if want("summary") {
            line("HARVARD CPU SIMULATION STATISTICS".into());
            line("==========================================================".into());
            line(format!("host_seconds             {seconds:.4} s"));
            line(format!("sim_cycles               {}", self.cycles));
            line(format!("sim_insts                {}", self.instructions_retired));
            line(format!("sim_ipc                  {:.4}", self.ipc()));
            line(format!("sim_cpi                  {:.4}", cyc as f64 / instr as f64));
            line("----------------------------------------------------------".into());
        }
        if want("instruction_mix") {
            line("INSTRUCTION MIX".into());
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.unknown", self.unknown_opcodes),
            ] {
                line(format!(
                    "  {name:<22} {count} ({:.2}%)",
                    pct(count, self.instructions_retired)
                ));
            }
            line("----------------------------------------------------------".into());
        }
        if want("control") {
            line("CONTROL FLOW".into());
            line(format!(
                "  branch.taken           {} ({:.2}%)",
                self.branches_taken,
                pct(self.branches_taken, self.inst_branch)
            ));
            line(format!("  pipeline.flushes       {}", self.flushes));
            line(format!("  pipeline.squashed      {}", self.squashed));
            line(format!(
                "  pipeline.bubbles       {} ({:.2}%)",
                self.bubbles,
                pct(self.bubbles, self.cycles)
            ));
        }
        line("==========================================================".into());
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
