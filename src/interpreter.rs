//! The fetch-execute loop.

use std::io::{self, Read, Write};

use crate::error::InterpreterError;
use crate::program::{Instruction, Program};
use crate::tape::Tape;
use crate::trace::{StderrTracer, TraceRecord, Tracer};

/// A reusable Brainfuck interpreter.
///
/// The interpreter maintains:
/// - the loaded instruction stream,
/// - a growable memory tape (30,000 cells to start, at most 1,000,000),
/// - an instruction pointer and a stack of open loop positions,
/// - a debug flag that turns on per-step tracing.
///
/// One instance is meant to be kept around: load a program, execute it,
/// reset, execute again or load something else.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    program: Program,
    tape: Tape,
    ip: usize,
    loop_stack: Vec<usize>,
    debug: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with `source` already loaded.
    pub fn with_source(source: impl AsRef<[u8]>) -> Self {
        let mut interpreter = Self::new();
        interpreter.load(source);
        interpreter
    }

    /// Replace the loaded program with the instructions found in `source`.
    pub fn load(&mut self, source: impl AsRef<[u8]>) {
        self.program = Program::filter(source);
    }

    /// Check bracket balance of the loaded program.
    pub fn validate(&self) -> Result<(), InterpreterError> {
        self.program.validate()
    }

    /// Clear the tape, pointer, instruction pointer and loop stack.
    /// The loaded program is kept.
    pub fn reset(&mut self) {
        self.tape.reset();
        self.ip = 0;
        self.loop_stack.clear();
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn instruction_count(&self) -> usize {
        self.program.len()
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.tape.pointer()
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Number of loops currently entered.
    pub fn loop_depth(&self) -> usize {
        self.loop_stack.len()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Execute against stdin/stdout, tracing to stderr when debug is on.
    pub fn execute(&mut self) -> Result<(), InterpreterError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.execute_with(&mut stdin.lock(), &mut stdout.lock(), &mut StderrTracer)
    }

    /// Validate, reset, then run the program to completion.
    ///
    /// Every `.` writes one byte to `output` and flushes it. Every `,` reads
    /// one byte from `input`; end of input and read errors both store 0.
    /// When debug is on, `tracer` sees the state before each step.
    ///
    /// On error the tape and pointers are left as they were at the failing
    /// instruction, and anything already written to `output` stays written.
    pub fn execute_with<R, W, T>(
        &mut self,
        input: &mut R,
        output: &mut W,
        tracer: &mut T,
    ) -> Result<(), InterpreterError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        T: Tracer + ?Sized,
    {
        self.validate()?;
        self.reset();
        self.run(input, output, tracer)
    }

    fn run<R, W, T>(&mut self, input: &mut R, output: &mut W, tracer: &mut T) -> Result<(), InterpreterError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        T: Tracer + ?Sized,
    {
        let code_len = self.program.len();

        while self.ip < code_len {
            let ip = self.ip;
            let instr = self.program[ip];

            if self.debug {
                tracer.step(&TraceRecord {
                    ip,
                    instruction: instr,
                    pointer: self.tape.pointer(),
                    value: self.tape.current(),
                });
            }

            match instr {
                Instruction::MoveRight => {
                    self.tape
                        .move_right()
                        .map_err(|e| InterpreterError::MemoryLimitExceeded { ip, limit: e.limit })?;
                }
                Instruction::MoveLeft => self.tape.move_left(),
                Instruction::Increment => self.tape.increment(),
                Instruction::Decrement => self.tape.decrement(),
                Instruction::Output => {
                    let byte = [self.tape.current()];
                    output
                        .write_all(&byte)
                        .and_then(|()| output.flush())
                        .map_err(|source| InterpreterError::Output { ip, source })?;
                }
                Instruction::Input => {
                    let mut buf = [0u8; 1];
                    let value = match input.read(&mut buf) {
                        Ok(1) => buf[0],
                        // EOF and read errors look the same to the program
                        _ => 0,
                    };
                    self.tape.set_current(value);
                }
                Instruction::JumpIfZero => {
                    if self.tape.current() == 0 {
                        self.ip = self.matching_close(ip)?;
                    } else {
                        self.loop_stack.push(ip);
                    }
                }
                Instruction::JumpBackIfNonzero => {
                    let Some(&open) = self.loop_stack.last() else {
                        return Err(InterpreterError::RuntimeUnmatchedClose { ip });
                    };
                    if self.tape.current() != 0 {
                        self.ip = open;
                    } else {
                        self.loop_stack.pop();
                    }
                }
            }

            self.ip += 1;
        }

        Ok(())
    }

    /// Scan forward from the `[` at `open` to its matching `]`.
    fn matching_close(&self, open: usize) -> Result<usize, InterpreterError> {
        let mut depth = 0usize;
        for (pos, instr) in self.program.iter().enumerate().skip(open + 1) {
            match instr {
                Instruction::JumpIfZero => depth += 1,
                Instruction::JumpBackIfNonzero if depth == 0 => return Ok(pos),
                Instruction::JumpBackIfNonzero => depth -= 1,
                _ => {}
            }
        }
        Err(InterpreterError::RuntimeUnmatchedOpen { ip: open })
    }
}
