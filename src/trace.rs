//! Per-step execution tracing for debug mode.

use std::fmt;
use std::io::{self, Write};

use crate::program::Instruction;

/// Machine state just before an instruction takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    pub ip: usize,
    pub instruction: Instruction,
    pub pointer: usize,
    pub value: u8,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[DEBUG] Step {}: '{}' ptr={} val={}",
            self.ip, self.instruction, self.pointer, self.value
        )
    }
}

/// Receives one record per executed step while debug mode is on.
pub trait Tracer {
    fn step(&mut self, record: &TraceRecord);
}

/// Writes each record as one line on stderr, kept apart from program output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTracer;

impl Tracer for StderrTracer {
    fn step(&mut self, record: &TraceRecord) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{record}");
        let _ = err.flush();
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Tracer for NoTrace {
    fn step(&mut self, _record: &TraceRecord) {}
}

impl Tracer for Vec<TraceRecord> {
    fn step(&mut self, record: &TraceRecord) {
        self.push(*record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_renders_debug_line() {
        let record = TraceRecord {
            ip: 12,
            instruction: Instruction::JumpBackIfNonzero,
            pointer: 3,
            value: 255,
        };
        assert_eq!(record.to_string(), "[DEBUG] Step 12: ']' ptr=3 val=255");
    }
}
