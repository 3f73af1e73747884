//! Entry points behind the `bfi` binary. Each returns a process exit code.

pub mod exec;
pub mod shell;
