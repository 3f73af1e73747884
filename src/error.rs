use std::fmt;

/// Errors that can occur while validating or executing a program.
///
/// Every variant carries the index of the offending instruction in the
/// filtered instruction stream, so callers can point at it.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// Loops were not balanced; found before execution started.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: UnmatchedBracketKind },

    /// A `[` on a zero cell had no matching `]` to jump to.
    #[error("Unmatched '[' at instruction {ip}")]
    RuntimeUnmatchedOpen { ip: usize },

    /// A `]` was reached with no open loop on the loop stack.
    #[error("Unmatched ']' at instruction {ip}")]
    RuntimeUnmatchedClose { ip: usize },

    /// Moving right would grow the tape past its cell limit.
    #[error("Memory limit exceeded ({limit} cells) at instruction {ip}")]
    MemoryLimitExceeded { ip: usize, limit: usize },

    /// Writing or flushing program output failed.
    #[error("Output error at instruction {ip}: {source}")]
    Output {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

impl InterpreterError {
    /// Index of the instruction the error was raised at.
    pub fn ip(&self) -> usize {
        match self {
            InterpreterError::UnmatchedBracket { ip, .. }
            | InterpreterError::RuntimeUnmatchedOpen { ip }
            | InterpreterError::RuntimeUnmatchedClose { ip }
            | InterpreterError::MemoryLimitExceeded { ip, .. }
            | InterpreterError::Output { ip, .. } => *ip,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_instruction() {
        let err = InterpreterError::UnmatchedBracket { ip: 4, kind: UnmatchedBracketKind::Close };
        assert_eq!(err.to_string(), "Unmatched bracket ']' at instruction 4");

        let err = InterpreterError::MemoryLimitExceeded { ip: 9, limit: 1_000_000 };
        assert_eq!(err.to_string(), "Memory limit exceeded (1000000 cells) at instruction 9");
        assert_eq!(err.ip(), 9);
    }
}
