//! Instruction set, source filtering and bracket validation.

use std::fmt;
use std::ops::Deref;

use crate::error::{InterpreterError, UnmatchedBracketKind};

/// One of the eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    JumpIfZero,
    /// `]`
    JumpBackIfNonzero,
}

impl Instruction {
    /// Decode a source byte, or `None` if the byte is not an instruction.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'>' => Instruction::MoveRight,
            b'<' => Instruction::MoveLeft,
            b'+' => Instruction::Increment,
            b'-' => Instruction::Decrement,
            b'.' => Instruction::Output,
            b',' => Instruction::Input,
            b'[' => Instruction::JumpIfZero,
            b']' => Instruction::JumpBackIfNonzero,
            _ => return None,
        })
    }

    /// The source character for this instruction.
    pub fn symbol(self) -> char {
        match self {
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::JumpIfZero => '[',
            Instruction::JumpBackIfNonzero => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A filtered instruction stream.
///
/// Built once from source text; everything that is not one of `><+-.,[]`
/// is dropped, so there is no comment syntax to speak of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Keep only Brainfuck instruction bytes from `source`, in order.
    pub fn filter(source: impl AsRef<[u8]>) -> Self {
        let instructions = source
            .as_ref()
            .iter()
            .filter_map(|&b| Instruction::from_byte(b))
            .collect();
        Self { instructions }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check that every `[` has a matching `]` and vice versa.
    pub fn validate(&self) -> Result<(), InterpreterError> {
        validate_brackets(&self.instructions)
    }
}

impl Deref for Program {
    type Target = [Instruction];

    fn deref(&self) -> &Self::Target {
        &self.instructions
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}

/// Single left-to-right pass keeping a running bracket balance.
///
/// A `]` that would take the balance below zero fails immediately. A
/// leftover positive balance reports the innermost `[` still open.
pub fn validate_brackets(instructions: &[Instruction]) -> Result<(), InterpreterError> {
    let mut open: Vec<usize> = Vec::new();

    for (ip, instr) in instructions.iter().enumerate() {
        match instr {
            Instruction::JumpIfZero => open.push(ip),
            Instruction::JumpBackIfNonzero => {
                if open.pop().is_none() {
                    return Err(InterpreterError::UnmatchedBracket {
                        ip,
                        kind: UnmatchedBracketKind::Close,
                    });
                }
            }
            _ => {}
        }
    }

    if let Some(ip) = open.last().copied() {
        return Err(InterpreterError::UnmatchedBracket {
            ip,
            kind: UnmatchedBracketKind::Open,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_drops_everything_but_instructions() {
        let program = Program::filter("hello +[ -> world ]\n# .,<");
        assert_eq!(program.to_string(), "+[->].,<");
        assert_eq!(program.len(), 8);
    }

    #[test]
    fn filter_accepts_non_utf8_bytes() {
        let program = Program::filter([0xff, b'+', 0x80, b'.']);
        assert_eq!(program.instructions(), &[Instruction::Increment, Instruction::Output]);
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        let program = Program::filter("no instructions here");
        assert!(program.is_empty());
        assert!(program.validate().is_ok());
    }

    #[test]
    fn nested_balanced_loops_validate() {
        assert!(Program::filter("+[>[-]<[[]]]").validate().is_ok());
    }

    #[test]
    fn stray_close_fails_at_its_position() {
        let err = Program::filter("+]+[").validate().unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 1, kind: UnmatchedBracketKind::Close }
        ));
    }

    #[test]
    fn leftover_open_reports_innermost() {
        let err = Program::filter("[[]+[").validate().unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 4, kind: UnmatchedBracketKind::Open }
        ));
    }

    #[test]
    fn validation_is_repeatable() {
        let program = Program::filter("[[]");
        let first = program.validate().is_err();
        let second = program.validate().is_err();
        assert!(first && second);
        assert_eq!(program.to_string(), "[[]");
    }
}
