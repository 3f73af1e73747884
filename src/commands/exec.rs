use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli_util::print_interpreter_error;
use crate::Interpreter;

/// Where the program to execute comes from.
#[derive(Debug, Clone)]
pub enum ProgramSource {
    /// Literal code given with `--code`.
    Code(String),
    /// A file given as the positional argument.
    File(PathBuf),
}

/// Load, validate and execute one program against stdin/stdout.
/// Returns 0 on success and 1 on any failure.
pub fn run(program: &str, source: ProgramSource, debug: bool) -> i32 {
    let code = match source {
        ProgramSource::Code(code) => code.into_bytes(),
        ProgramSource::File(path) => match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("{program}: failed to read {}: {e}", path.display());
                let _ = io::stderr().flush();
                return 1;
            }
        },
    };

    let mut bf = Interpreter::with_source(&code);
    bf.set_debug(debug);

    let result = bf.execute();
    let _ = io::stdout().flush();

    if let Err(err) = result {
        let instructions = bf.program().to_string();
        print_interpreter_error(Some(program), &instructions, &err);
        return 1;
    }

    0
}
