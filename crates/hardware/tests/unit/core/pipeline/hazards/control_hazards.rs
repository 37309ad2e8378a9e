//! Control Hazard Tests: Pipeline Flushing on Redirect.
//!
//! Runs short programs through the full pipeline and checks that a taken
//! BEQZ or a BR squashes the two wrong-path instructions, redirects fetch,
//! and updates the flush counters.

use harvsim_core::core::pipeline::PipelineState;
use harvsim_core::core::pipeline::hazards::FlushRequest;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

fn movi(r: u8, imm: i32) -> u16 {
    InstructionBuilder::new().movi(r, imm).build()
}

// ══════════════════════════════════════════════════════════
// 1. Taken BEQZ squashes the wrong path
// ══════════════════════════════════════════════════════════

#[test]
fn taken_beqz_skips_two_instructions() {
    // 0: MOVI R1 0
    // 1: BEQZ R1 2   (taken, target 4)
    // 2: MOVI R3 9   (squashed)
    // 3: MOVI R4 9   (squashed)
    // 4: MOVI R5 7
    let mut tc = TestContext::new().load_program(&[
        movi(1, 0),
        InstructionBuilder::new().beqz(1, 2).build(),
        movi(3, 9),
        movi(4, 9),
        movi(5, 7),
    ]);

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(summary.cycles, 7);
    assert_eq!(tc.get_reg(3), 0, "R3 must not be written (squashed)");
    assert_eq!(tc.get_reg(4), 0, "R4 must not be written (squashed)");
    assert_eq!(tc.get_reg(5), 7, "branch target must execute");

    let stats = &tc.cpu().stats;
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.squashed, 2);
    assert_eq!(stats.branches_taken, 1);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.bubbles, 4);
}

#[test]
fn flush_is_applied_the_cycle_after_the_branch_executes() {
    let mut tc = TestContext::new().load_program(&[
        movi(1, 0),
        InstructionBuilder::new().beqz(1, 2).build(),
        movi(3, 9),
        movi(4, 9),
        movi(5, 7),
    ]);

    let reports = tc.run(7);
    assert_eq!(reports.len(), 7);

    // Cycle 4: BEQZ retires and requests the redirect.
    let branch = reports[3].retired.expect("BEQZ executes in cycle 4");
    assert_eq!(branch.entry.pc, 1);
    assert_eq!(branch.outcome.control_transfer, Some(4));
    assert_eq!(reports[3].flush, None);

    // Cycle 5: the flush empties both slots and fetch restarts at the target.
    let cycle5 = &reports[4];
    assert_eq!(
        cycle5.flush,
        Some(FlushRequest {
            target: 4,
            source_pc: 1
        })
    );
    assert_eq!(cycle5.squashed, 2);
    assert_eq!(cycle5.retired, None);
    assert_eq!(cycle5.promoted, None);
    assert_eq!(cycle5.fetched.map(|f| f.pc), Some(4));

    assert_eq!(reports[6].state, PipelineState::Halted);
}

// ══════════════════════════════════════════════════════════
// 2. Not-taken BEQZ costs nothing
// ══════════════════════════════════════════════════════════

#[test]
fn not_taken_beqz_falls_through() {
    let mut tc = TestContext::new().load_program(&[
        movi(1, 1),
        InstructionBuilder::new().beqz(1, 2).build(),
        movi(3, 9),
        movi(4, 9),
    ]);

    let summary = tc.run_to_halt();

    assert_eq!(summary.cycles, 6, "four instructions take n + 2 cycles");
    assert_eq!(tc.get_reg(3), 9);
    assert_eq!(tc.get_reg(4), 9);
    assert_eq!(tc.cpu().stats.flushes, 0);
    assert_eq!(tc.cpu().stats.inst_branch, 1);
    assert_eq!(tc.cpu().stats.branches_taken, 0);
}

#[test]
fn beqz_with_zero_offset_squashes_without_refetch() {
    // 0: BEQZ R0 0   (taken, target 1, resolves in cycle 3)
    // 1: MOVI R2 3   (already in Execute when the flush lands)
    // Fetch saw the end marker in cycle 3, so address 1 is never fetched again.
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().beqz(0, 0).build(),
        movi(2, 3),
    ]);

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(summary.cycles, 4);
    assert_eq!(tc.get_reg(2), 0, "squashed instruction is not re-executed");
    assert_eq!(tc.cpu().pc, 1);
    assert_eq!(tc.cpu().stats.flushes, 1);
    assert_eq!(tc.cpu().stats.squashed, 1);
}

// ══════════════════════════════════════════════════════════
// 3. BR jumps to a register-composed target
// ══════════════════════════════════════════════════════════

#[test]
fn br_jumps_over_instructions() {
    // R2 = 5, R1 = 0 → target (0 << 6) | 5 = 5
    let mut tc = TestContext::new().load_program(&[
        movi(2, 5),
        InstructionBuilder::new().br(1, 2).build(),
        movi(3, 1),
        movi(4, 1),
        movi(6, 1),
        movi(7, 2),
    ]);

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(tc.get_reg(3), 0);
    assert_eq!(tc.get_reg(4), 0);
    assert_eq!(tc.get_reg(6), 0, "address 4 lies between the squash and the target");
    assert_eq!(tc.get_reg(7), 2);
    assert_eq!(tc.cpu().stats.inst_branch, 1);
    assert_eq!(tc.cpu().stats.branches_taken, 1);
}

#[test]
fn br_backwards_loop_is_stopped_by_cycle_limit() {
    // BR resolves while fetch is still reading the two words behind it, so
    // the redirect always lands before the end marker is seen.
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().br(0, 0).build(),
        movi(1, 1),
        movi(2, 2),
    ]);
    tc.sim.set_max_cycles(Some(50));

    let summary = tc.run_to_halt();

    assert!(!summary.halted);
    assert_eq!(summary.cycles, 50);
    assert_ne!(tc.sim.pipeline.state(), PipelineState::Halted);
}

// ══════════════════════════════════════════════════════════
// 4. Redirects after the end of fetch are dropped
// ══════════════════════════════════════════════════════════

#[test]
fn trailing_br_halts_once_stages_drain() {
    // The jump back to 0 retires in cycle 5, after fetch has hit the end
    // marker; the redirect is never applied.
    let mut tc = TestContext::new().load_program(&[
        movi(1, 1),
        movi(2, 2),
        InstructionBuilder::new().br(0, 0).build(),
    ]);

    let reports = tc.run(200);

    assert_eq!(reports.len(), 5);
    assert!(tc.sim.is_halted());
    let last = reports[4].retired.expect("BR retires in the last cycle");
    assert_eq!(last.outcome.control_transfer, Some(0));
    assert_eq!(tc.sim.pipeline.pending_flush().map(|f| f.target), Some(0));
    assert_eq!(tc.cpu().stats.flushes, 0);
    assert_eq!(tc.cpu().stats.instructions_retired, 3);
}

#[test]
fn two_instruction_loop_halts_instead_of_spinning() {
    let mut tc = TestContext::new().load_program(&[movi(1, 1), InstructionBuilder::new().br(0, 0).build()]);
    tc.sim.set_max_cycles(Some(200));

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(summary.cycles, 4, "two instructions take n + 2 cycles");
    assert_eq!(summary.instructions_retired, 2);
}

#[test]
fn branch_over_end_marker_is_dropped() {
    // 0: BEQZ R0 1   (taken, target 2, resolves in cycle 3)
    // 1: 0x0000      (end marker; fetch stops here in cycle 2)
    // 2: MOVI R5 7   (never fetched)
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().beqz(0, 1).build(),
        0x0000,
        movi(5, 7),
    ]);

    let reports = tc.run(10);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].state, PipelineState::Running);
    assert_eq!(reports[1].state, PipelineState::Draining);
    assert_eq!(reports[2].state, PipelineState::Halted);
    assert_eq!(
        reports[2].retired.and_then(|r| r.outcome.control_transfer),
        Some(2)
    );
    assert_eq!(tc.get_reg(5), 0);
    assert_eq!(tc.cpu().pc, 1, "the dropped redirect never moves the PC");
}
