//! Pipeline Termination and Timing Tests.
//!
//! Covers the end-of-program marker, the Running → Draining → Halted
//! sequence, cycle counts, the cycle limit, and in-order operand reads.

use harvsim_core::Simulator;
use harvsim_core::config::{Config, RegisterInit};
use harvsim_core::core::arch::StatusRegister;
use harvsim_core::core::pipeline::PipelineState;
use harvsim_core::sim::assembler::assemble;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::TestContext;

fn movi(r: u8, imm: i32) -> u16 {
    InstructionBuilder::new().movi(r, imm).build()
}

// ══════════════════════════════════════════════════════════
// 1. Cycle counts
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
#[case(40)]
fn straight_line_program_takes_n_plus_two_cycles(#[case] n: u8) {
    let words: Vec<u16> = (0..n).map(|i| movi(i % 60 + 1, 1)).collect();
    let mut tc = TestContext::new().load_program(&words);

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(summary.cycles, u64::from(n) + 2);
    assert_eq!(summary.instructions_retired, u64::from(n));
    assert_eq!(tc.cpu().stats.bubbles, 2);
}

#[test]
fn empty_program_halts_after_one_cycle() {
    let mut tc = TestContext::new().load_program(&[]);

    let reports = tc.run(5);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].fetched, None);
    assert_eq!(reports[0].state, PipelineState::Halted);
    assert_eq!(tc.cpu().stats.instructions_retired, 0);
}

#[test]
fn leading_end_marker_hides_the_rest_of_the_program() {
    let mut tc = TestContext::new().load_program(&[0x0000, movi(1, 3)]);

    let summary = tc.run_to_halt();

    assert_eq!(summary.cycles, 1);
    assert_eq!(tc.get_reg(1), 0);
}

// ══════════════════════════════════════════════════════════
// 2. State sequence
// ══════════════════════════════════════════════════════════

#[test]
fn states_run_then_drain_then_halt() {
    let mut tc = TestContext::new().load_program(&[movi(1, 1), movi(2, 2)]);

    let states: Vec<PipelineState> = tc.run(10).iter().map(|r| r.state).collect();

    assert_eq!(
        states,
        vec![
            PipelineState::Running,
            PipelineState::Running,
            PipelineState::Draining,
            PipelineState::Halted,
        ]
    );
}

#[test]
fn tick_after_halt_changes_nothing() {
    let mut tc = TestContext::new().load_program(&[movi(1, 1)]);
    let summary = tc.run_to_halt();
    let pc = tc.cpu().pc;

    let report = tc.sim.tick();

    assert_eq!(report.cycle, summary.cycles);
    assert_eq!(report.retired, None);
    assert_eq!(report.fetched, None);
    assert_eq!(report.state, PipelineState::Halted);
    assert_eq!(tc.cpu().stats.cycles, summary.cycles);
    assert_eq!(tc.cpu().pc, pc);
}

#[test]
fn reload_restarts_from_address_zero() {
    let mut tc = TestContext::new().load_program(&[movi(1, 1)]);
    let _ = tc.run_to_halt();

    tc.sim
        .load_words(&[movi(2, 2)])
        .expect("program fits instruction memory");
    assert_eq!(tc.sim.pipeline.state(), PipelineState::Running);
    assert!(tc.sim.pipeline.fetch_armed());

    let summary = tc.run_to_halt();
    assert!(summary.halted);
    assert_eq!(tc.get_reg(2), 2);
}

#[test]
fn cycle_limit_stops_a_running_program() {
    let words: Vec<u16> = (0..20).map(|_| movi(1, 1)).collect();
    let mut tc = TestContext::new().load_program(&words);
    tc.sim.set_max_cycles(Some(5));

    let summary = tc.run_to_halt();

    assert!(!summary.halted);
    assert_eq!(summary.cycles, 5);
    assert_eq!(summary.instructions_retired, 3);
}

// ══════════════════════════════════════════════════════════
// 3. Operands are read in Execute
// ══════════════════════════════════════════════════════════

#[test]
fn back_to_back_dependency_needs_no_forwarding() {
    let mut tc = TestContext::new().load_program(&[
        movi(1, 5),
        InstructionBuilder::new().add(1, 1).build(),
        InstructionBuilder::new().add(1, 1).build(),
    ]);

    let _ = tc.run_to_halt();

    assert_eq!(tc.get_reg(1), 20);
}

#[test]
fn store_then_load_sees_the_new_value() {
    let mut tc = TestContext::new().load_program(&[
        movi(1, -9),
        InstructionBuilder::new().str(1, 10).build(),
        InstructionBuilder::new().ldr(2, 10).build(),
    ]);

    let _ = tc.run_to_halt();

    assert_eq!(tc.get_mem(10), -9);
    assert_eq!(tc.get_reg(2), -9);
}

#[test]
fn movi_and_memory_ops_keep_flags() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().sub(0, 1).build(),
        movi(2, 4),
        InstructionBuilder::new().str(2, 0).build(),
        InstructionBuilder::new().ldr(3, 0).build(),
    ]);
    tc.set_reg(1, 1);

    let _ = tc.run_to_halt();

    // 0 - 1 = -1 with borrow: C N S.
    assert_eq!(
        tc.cpu().sreg.bits(),
        StatusRegister::C | StatusRegister::N | StatusRegister::S
    );
    assert_eq!(tc.get_reg(3), 4);
}

#[test]
fn unknown_opcode_does_not_stop_the_program() {
    let mut tc = TestContext::new().load_program(&[
        InstructionBuilder::new().opcode_bits(15).r1(1).r2(2).build(),
        movi(4, 11),
    ]);

    let summary = tc.run_to_halt();

    assert!(summary.halted);
    assert_eq!(summary.instructions_retired, 2);
    assert_eq!(tc.get_reg(4), 11);
    assert_eq!(tc.cpu().stats.unknown_opcodes, 1);
}

#[test]
fn default_registers_feed_the_first_instruction() {
    let mut tc = TestContext::with_default_registers().load_program(&[
        InstructionBuilder::new().add(1, 2).build(),
        InstructionBuilder::new().mul(1, 3).build(),
    ]);

    let _ = tc.run_to_halt();

    // (5 + 20) * 100 = 2500, low byte 0xC4.
    assert_eq!(tc.get_reg(1), 0xC4_u8 as i8);
}

// ══════════════════════════════════════════════════════════
// 4. End-to-end runs from program text
// ══════════════════════════════════════════════════════════

fn run_source(source: &str, registers: Vec<RegisterInit>) -> Simulator {
    let mut config = Config::default();
    config.program.initial_registers = registers;
    let mut sim = Simulator::new(&config);
    sim.load(&assemble(source)).expect("program fits");
    let summary = sim.run();
    assert!(summary.halted);
    sim
}

#[test]
fn add_of_zero_keeps_value_and_clears_flags() {
    let sim = run_source("MOVI R1 10\nMOVI R2 0\nADD R1 R2\n", Vec::new());

    assert_eq!(sim.cpu.regs.as_slice()[1], 10);
    assert_eq!(sim.cpu.regs.as_slice()[2], 0);
    assert!(!sim.cpu.sreg.zero());
    assert!(!sim.cpu.sreg.negative());
    assert_eq!(sim.cpu.stats.cycles, 5);
}

#[test]
fn store_then_load_round_trips_through_data_memory() {
    let sim = run_source(
        "STR R1 10\nLDR R3 10\n",
        vec![RegisterInit { index: 1, value: 7 }],
    );

    assert_eq!(sim.cpu.dmem.as_slice()[10], 7);
    assert_eq!(sim.cpu.regs.as_slice()[3], 7);
    assert_eq!(sim.cpu.stats.inst_store, 1);
    assert_eq!(sim.cpu.stats.inst_load, 1);
}
