//! Execute stage and retirement tests.
//!
//! Each test decodes one instruction, executes it against a prepared CPU,
//! and checks both the described outcome and the state after `retire`.

use harvsim_core::common::{DataAddr, RegIdx};
use harvsim_core::core::Cpu;
use harvsim_core::core::arch::StatusRegister;
use harvsim_core::core::pipeline::latches::{IdExEntry, IfIdEntry};
use harvsim_core::core::pipeline::stages::execute::{MemWrite, RegWrite};
use harvsim_core::core::pipeline::stages::{
    ExecutionOutcome, decode_stage, execute_stage, retire,
};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn r(n: u8) -> RegIdx {
    RegIdx::from_field(u16::from(n))
}

fn entry_at(pc: u16, b: InstructionBuilder) -> IdExEntry {
    decode_stage(&IfIdEntry { pc, inst: b.build() })
}

fn cpu_with(regs: &[(u8, i8)]) -> Cpu {
    let mut cpu = Cpu::default();
    for &(n, v) in regs {
        cpu.regs.write(r(n), v);
    }
    cpu
}

/// Executes and retires one instruction at `pc`.
fn step(cpu: &mut Cpu, pc: u16, b: InstructionBuilder) -> ExecutionOutcome {
    let entry = entry_at(pc, b);
    let out = execute_stage(cpu, &entry);
    retire(cpu, &entry, &out);
    out
}

// ══════════════════════════════════════════════════════════
// 1. Register operations
// ══════════════════════════════════════════════════════════

#[test]
fn add_writes_and_sets_flags_from_old_operands() {
    let mut cpu = cpu_with(&[(1, 127), (2, 1)]);
    let out = step(&mut cpu, 0, InstructionBuilder::new().add(1, 2));

    assert_eq!(
        out.reg_write,
        Some(RegWrite {
            reg: r(1),
            old: 127,
            new: -128
        })
    );
    assert_eq!(cpu.regs.read(r(1)), -128);
    assert_eq!(cpu.sreg.bits(), StatusRegister::N | StatusRegister::V);
    assert_eq!(out.control_transfer, None);
}

#[test]
fn add_same_register_doubles() {
    let mut cpu = cpu_with(&[(4, 3)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().add(4, 4));
    assert_eq!(cpu.regs.read(r(4)), 6);
}

#[test]
fn sub_sets_borrow() {
    let mut cpu = cpu_with(&[(1, 5), (2, 20)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().sub(1, 2));
    assert_eq!(cpu.regs.read(r(1)), -15);
    assert!(cpu.sreg.carry());
    assert!(cpu.sreg.negative());
    assert!(cpu.sreg.sign());
}

#[test]
fn mul_uses_reduced_flags() {
    let mut cpu = cpu_with(&[(1, 100), (3, 3)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().mul(1, 3));
    assert_eq!(cpu.regs.read(r(1)), 44);
    assert_eq!(cpu.sreg.bits(), 0);
}

#[test]
fn movi_sign_extends_and_keeps_flags() {
    let mut cpu = Cpu::default();
    cpu.sreg = StatusRegister::from_bits(StatusRegister::C);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().movi(7, -3));
    assert_eq!(cpu.regs.read(r(7)), -3);
    assert_eq!(cpu.sreg.bits(), StatusRegister::C);
}

#[test]
fn andi_with_negative_mask() {
    let mut cpu = cpu_with(&[(2, 0x3C)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().andi(2, -4));
    assert_eq!(cpu.regs.read(r(2)), 0x3C);

    let _ = step(&mut cpu, 1, InstructionBuilder::new().andi(2, 3));
    assert_eq!(cpu.regs.read(r(2)), 0);
    assert_eq!(cpu.sreg.bits(), StatusRegister::Z);
}

#[test]
fn eor_self_clears() {
    let mut cpu = cpu_with(&[(5, -77)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().eor(5, 5));
    assert_eq!(cpu.regs.read(r(5)), 0);
    assert!(cpu.sreg.zero());
}

#[test]
fn shifts_use_unsigned_count() {
    let mut cpu = cpu_with(&[(1, 1), (2, -64)]);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().sal(1, 7));
    assert_eq!(cpu.regs.read(r(1)), -128);
    assert_eq!(cpu.sreg.bits(), StatusRegister::N | StatusRegister::S);

    let _ = step(&mut cpu, 1, InstructionBuilder::new().sar(2, 3));
    assert_eq!(cpu.regs.read(r(2)), -8);

    // Count 32 has bit 5 set; it must not be read as -32.
    let _ = step(&mut cpu, 2, InstructionBuilder::new().sal(2, 32));
    assert_eq!(cpu.regs.read(r(2)), 0);
    assert!(cpu.sreg.zero());
}

// ══════════════════════════════════════════════════════════
// 2. Memory operations
// ══════════════════════════════════════════════════════════

#[test]
fn str_then_ldr_with_negative_address() {
    let mut cpu = cpu_with(&[(1, -5)]);
    let out = step(&mut cpu, 0, InstructionBuilder::new().str(1, -1));
    assert_eq!(
        out.mem_write,
        Some(MemWrite {
            addr: DataAddr::wrap(2047),
            value: -5
        })
    );
    assert_eq!(out.reg_write, None);
    assert_eq!(cpu.dmem.read(DataAddr::wrap(2047)), -5);

    let out = step(&mut cpu, 1, InstructionBuilder::new().ldr(2, -1));
    assert_eq!(out.mem_read, Some(DataAddr::wrap(-1)));
    assert_eq!(cpu.regs.read(r(2)), -5);
    assert_eq!(cpu.sreg.bits(), 0);
}

#[test]
fn ldr_positive_address() {
    let mut cpu = Cpu::default();
    cpu.dmem.write(DataAddr::wrap(31), 42);
    let _ = step(&mut cpu, 0, InstructionBuilder::new().ldr(9, 31));
    assert_eq!(cpu.regs.read(r(9)), 42);
}

// ══════════════════════════════════════════════════════════
// 3. Control flow
// ══════════════════════════════════════════════════════════

#[test]
fn beqz_taken_targets_pc_plus_one_plus_offset() {
    let mut cpu = Cpu::default();
    let out = step(&mut cpu, 4, InstructionBuilder::new().beqz(3, 2));
    assert_eq!(out.control_transfer, Some(7));
    assert_eq!(out.reg_write, None);
    assert_eq!(cpu.stats.branches_taken, 1);
}

#[test]
fn beqz_offset_is_unsigned() {
    let mut cpu = Cpu::default();
    let out = step(&mut cpu, 0, InstructionBuilder::new().beqz(0, 63));
    assert_eq!(out.control_transfer, Some(64));
}

#[test]
fn beqz_not_taken() {
    let mut cpu = cpu_with(&[(3, 1)]);
    let out = step(&mut cpu, 4, InstructionBuilder::new().beqz(3, 2));
    assert_eq!(out.control_transfer, None);
    assert_eq!(cpu.stats.inst_branch, 1);
    assert_eq!(cpu.stats.branches_taken, 0);
}

#[test]
fn br_composes_target_from_two_registers() {
    let mut cpu = cpu_with(&[(1, 1), (2, 2)]);
    let out = step(&mut cpu, 0, InstructionBuilder::new().br(1, 2));
    assert_eq!(out.control_transfer, Some(66));
    assert_eq!(cpu.sreg.bits(), 0);
}

#[test]
fn br_target_is_limited_to_instruction_memory() {
    let mut cpu = cpu_with(&[(1, -1), (2, -1)]);
    let out = step(&mut cpu, 0, InstructionBuilder::new().br(1, 2));
    assert_eq!(out.control_transfer, Some(0x3FF));
}

// ══════════════════════════════════════════════════════════
// 4. Unknown opcodes
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_opcode_changes_nothing() {
    let mut cpu = cpu_with(&[(1, 9)]);
    cpu.sreg = StatusRegister::from_bits(StatusRegister::Z);
    let before = cpu.clone();

    let out = step(&mut cpu, 0, InstructionBuilder::new().opcode_bits(12).r1(1).r2(1));
    assert!(out.unknown_opcode);
    assert_eq!(out.reg_write, None);
    assert_eq!(out.flags, None);
    assert_eq!(cpu.regs, before.regs);
    assert_eq!(cpu.sreg, before.sreg);
    assert_eq!(cpu.stats.unknown_opcodes, 1);
    assert_eq!(cpu.stats.instructions_retired, 1);
}
