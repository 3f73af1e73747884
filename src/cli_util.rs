use std::io::{self, Write};
use crate::InterpreterError;

/// Show this many instructions on either side of the caret.
const WINDOW: usize = 32;

/// Pretty-print an [`InterpreterError`] to stderr with caret positioning.
/// If `program` is `Some("bfi")`, messages are prefixed with "bfi: ...".
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    eprint!("{}", render_interpreter_error(program, code, err));
    let _ = io::stderr().flush();
}

/// The text [`print_interpreter_error`] writes: a message naming the
/// instruction index, the surrounding instructions, and a caret under the
/// offending one.
pub fn render_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) -> String {
    let msg = match err {
        InterpreterError::UnmatchedBracket { kind, .. } => {
            format!("Parse error: unmatched bracket {kind}")
        }
        InterpreterError::RuntimeUnmatchedOpen { .. } => "Runtime error: unmatched '['".to_string(),
        InterpreterError::RuntimeUnmatchedClose { .. } => "Runtime error: unmatched ']'".to_string(),
        InterpreterError::MemoryLimitExceeded { limit, .. } => {
            format!("Runtime error: memory limit exceeded ({limit} cells)")
        }
        InterpreterError::Output { source, .. } => format!("I/O error: {source}"),
    };
    let msg = match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg,
    };

    let mut out = format!("{msg} at instruction {}\n", err.ip());
    out.push_str(&context_window(code, err.ip()));
    out
}

/// Two lines: a slice of `code` around `pos` and a caret under `pos`.
/// `code` is a rendered instruction stream, so it is plain ASCII.
fn context_window(code: &str, pos: usize) -> String {
    let start = pos.saturating_sub(WINDOW).min(code.len());
    let end = (pos + WINDOW + 1).min(code.len());
    let caret_offset = pos.saturating_sub(start);
    format!("  {}\n  {}^\n", &code[start..end], " ".repeat(caret_offset))
}
