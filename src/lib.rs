//! A small Brainfuck interpreter library.
//!
//! Source text is filtered down to the eight instructions `><+-.,[]`,
//! checked for balanced brackets, and executed against a growable tape.
//!
//! Features and behaviors:
//! - Memory tape of 30,000 zeroed cells that doubles on demand, up to
//!   1,000,000 cells; running past that aborts with an error.
//! - Moving left from cell 0 leaves the pointer at 0.
//! - Cells are bytes with wraparound arithmetic.
//! - Input `,` reads one byte; on EOF (or a read error) the cell is set to 0.
//! - Output `.` writes the cell as one raw byte and flushes immediately.
//! - Everything that is not an instruction is ignored.
//! - Debug mode traces every step to stderr as
//!   `[DEBUG] Step <ip>: '<op>' ptr=<ptr> val=<cell>`.
//!
//! Quick start:
//!
//! ```no_run
//! use bfi::Interpreter;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let mut bf = Interpreter::with_source(code);
//! bf.execute().expect("program should run");
//! ```
//!
//! Capturing output instead of writing to stdout:
//!
//! ```
//! use bfi::{Interpreter, NoTrace};
//!
//! let mut bf = Interpreter::with_source("+++.");
//! let mut output = Vec::new();
//! bf.execute_with(&mut std::io::empty(), &mut output, &mut NoTrace).unwrap();
//! assert_eq!(output, [3]);
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod program;
pub mod shell;
pub mod tape;
pub mod trace;

pub use error::{InterpreterError, UnmatchedBracketKind};
pub use interpreter::Interpreter;
pub use program::{Instruction, Program};
pub use tape::{Tape, TapeError};
pub use trace::{NoTrace, StderrTracer, TraceRecord, Tracer};
