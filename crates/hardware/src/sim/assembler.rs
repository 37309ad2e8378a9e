//! Program Text Assembler.
//!
//! This module turns the line-oriented program format into instruction words. It performs:
//! 1. **Line Filtering:** Skips blank lines and comment lines starting with `#` or `/`.
//! 2. **Tokenizing:** Splits on whitespace and commas; mnemonics and the `R` prefix ignore case.
//! 3. **Operand Checking:** Registers must be `R0`-`R63`; immediates are decimal or `0x` hex.
//! 4. **Encoding:** Immediates are masked to the 6-bit field in two's complement.
//!
//! A bad line never aborts assembly. It is skipped and reported as an [`AsmError`];
//! suspicious but usable lines are kept and reported as an [`AsmWarning`].
//!
//! ```text
//! # countdown
//! MOVI R1, 3
//! SUB  r1 r2
//! BEQZ R1 1
//! ```

use tracing::warn;

use crate::common::constants::{INSTRUCTION_MEMORY_SIZE, REGISTER_COUNT};
use crate::common::{AsmError, AsmErrorKind, AsmWarning, AsmWarningKind};
use crate::isa::decode::{encode, imm6_bits, sign_extend_6};
use crate::isa::opcodes::{Opcode, OperandForm};

/// Result of assembling a program text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction words in load order, starting at address 0.
    pub words: Vec<u16>,
    /// 1-based source line of each word.
    pub lines: Vec<usize>,
    /// Lines that were skipped.
    pub errors: Vec<AsmError>,
    /// Lines that were kept but look wrong.
    pub warnings: Vec<AsmWarning>,
}

impl Program {
    /// Number of assembled instructions.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no line assembled.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One assembled line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledLine {
    /// The instruction word.
    pub word: u16,
    /// Set when the immediate had to be truncated to fit.
    pub warning: Option<AsmWarningKind>,
}

/// Describes the operands each form expects, for diagnostics.
const fn expected_operands(form: OperandForm) -> &'static str {
    match form {
        OperandForm::RegReg => "two registers (Rn Rm)",
        OperandForm::RegSignedImm | OperandForm::RegUnsignedImm => {
            "a register and an immediate (Rn imm)"
        }
    }
}

/// Parses a register operand such as `R12` or `r7`.
fn parse_reg(tok: &str) -> Result<u8, AsmErrorKind> {
    tok.strip_prefix(['R', 'r'])
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|&n| usize::from(n) < REGISTER_COUNT)
        .ok_or_else(|| AsmErrorKind::BadRegister(tok.to_string()))
}

/// Parses a decimal or `0x`-prefixed hexadecimal immediate.
fn parse_imm(tok: &str) -> Result<i32, AsmErrorKind> {
    let parsed = match tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        Some(hex) => i32::from_str_radix(hex, 16).ok(),
        None => tok.parse::<i32>().ok(),
    };
    parsed.ok_or_else(|| AsmErrorKind::BadImmediate(tok.to_string()))
}

/// Encodes an immediate into the 6-bit field, noting truncation.
fn encode_imm(imm: i32, form: OperandForm) -> (u8, Option<AsmWarningKind>) {
    let bits = imm6_bits(imm);
    let (range, fits, stored) = match form {
        OperandForm::RegUnsignedImm => ("0..=63", (0..=63).contains(&imm), i32::from(bits)),
        OperandForm::RegSignedImm | OperandForm::RegReg => (
            "-32..=31",
            (-32..=31).contains(&imm),
            i32::from(sign_extend_6(bits)),
        ),
    };
    let warning = (!fits).then_some(AsmWarningKind::ImmediateTruncated {
        value: imm,
        range,
        stored,
    });
    (bits, warning)
}

/// Assembles a single line of program text.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines, `Ok(Some(_))` for an instruction.
///
/// # Errors
///
/// The reason the line cannot be assembled. Operands after the required two
/// are ignored.
///
/// # Examples
///
/// ```
/// use harvsim_core::sim::assembler::assemble_line;
///
/// assert_eq!(assemble_line("MOVI R1 10").unwrap().unwrap().word, 0x304A);
/// assert_eq!(assemble_line("add r1, r2").unwrap().unwrap().word, 0x0042);
/// assert!(assemble_line("# comment").unwrap().is_none());
/// assert!(assemble_line("NOP").is_err());
/// ```
pub fn assemble_line(line: &str) -> Result<Option<AssembledLine>, AsmErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('/') {
        return Ok(None);
    }

    let mut tokens = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let op = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AsmErrorKind::UnknownMnemonic(mnemonic.to_string()))?;
    let form = op.operand_form();

    let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
        return Err(AsmErrorKind::MissingOperand {
            mnemonic: op.mnemonic(),
            expected: expected_operands(form),
        });
    };

    let r1 = parse_reg(first)?;
    let (field, warning) = match form {
        OperandForm::RegReg => (parse_reg(second)?, None),
        OperandForm::RegSignedImm | OperandForm::RegUnsignedImm => {
            encode_imm(parse_imm(second)?, form)
        }
    };

    let word = encode(op, r1, field);
    let warning = warning.or((word == 0).then_some(AsmWarningKind::EndMarker));
    Ok(Some(AssembledLine { word, warning }))
}

/// Assembles a whole program text.
///
/// At most one instruction memory's worth of words is kept. Every diagnostic
/// is also logged with `tracing::warn!`.
///
/// # Examples
///
/// ```
/// use harvsim_core::sim::assembler::assemble;
///
/// let program = assemble("MOVI R1 10\nBOGUS R1\n\nADD R1 R2\n");
/// assert_eq!(program.words, vec![0x304A, 0x0042]);
/// assert_eq!(program.lines, vec![1, 4]);
/// assert_eq!(program.errors[0].line, 2);
/// ```
pub fn assemble(text: &str) -> Program {
    let mut program = Program::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match assemble_line(line) {
            Ok(None) => {}
            Ok(Some(_)) if program.words.len() == INSTRUCTION_MEMORY_SIZE => {
                let warning = AsmWarning {
                    line: line_no,
                    kind: AsmWarningKind::Overflow {
                        capacity: INSTRUCTION_MEMORY_SIZE,
                    },
                };
                warn!("{warning}");
                program.warnings.push(warning);
                break;
            }
            Ok(Some(assembled)) => {
                program.words.push(assembled.word);
                program.lines.push(line_no);
                if let Some(kind) = assembled.warning {
                    let warning = AsmWarning {
                        line: line_no,
                        kind,
                    };
                    warn!("{warning}");
                    program.warnings.push(warning);
                }
            }
            Err(kind) => {
                let error = AsmError {
                    line: line_no,
                    kind,
                };
                warn!("skipping {error}");
                program.errors.push(error);
            }
        }
    }

    program
}
