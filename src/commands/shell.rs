use std::io::{self, IsTerminal, Write};

use crate::config::{Config, ShellMode};
use crate::shell::{run_bare, run_editor, select_mode, ModeFlagOverride, Shell};

/// Start the command shell and return the process exit code.
pub fn run(program: &str, mode_flag: ModeFlagOverride, config: &Config, debug: bool) -> i32 {
    let mode = match select_mode(mode_flag, config.shell.mode) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{program}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately,
    // which is also the only way to stop a runaway program
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let mut shell = Shell::new(debug);

    let result = match mode {
        ShellMode::Editor => {
            // Print banners only if stderr is a TTY
            if io::stderr().is_terminal() {
                eprintln!("bfi v{} - Brainfuck interpreter", env!("CARGO_PKG_VERSION"));
                eprintln!("Type 'help' for commands");
                eprintln!();
                let _ = io::stderr().flush();
            }
            run_editor(&mut shell, config)
        }
        ShellMode::Bare => run_bare(&mut shell),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program}: shell error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}
