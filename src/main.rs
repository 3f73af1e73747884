use bfi::commands::{self, exec::ProgramSource};
use bfi::config::Config;
use bfi::shell::ModeFlagOverride;
use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn print_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"bfi v{1} - Brainfuck interpreter

Usage:
  {0}                   # Start the interactive shell
  {0} <FILE>            # Execute a Brainfuck file
  {0} -c "<code>"       # Execute Brainfuck code given on the command line
  {0} -d <FILE>         # Execute with a step-by-step trace on stderr

Options:
  --code,    -c <CODE>  Execute CODE instead of reading a file
  --debug,   -d         Trace every step to stderr
  --bare                Force the non-interactive shell (commands from stdin)
  --editor              Force the interactive shell (errors if stdin is not a TTY)
  --help,    -h         Show this help
  --version, -v         Show version information

Notes:
- Only ><+-.,[] are instructions; every other character is ignored.
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- Memory starts at 30,000 cells and grows up to 1,000,000.
- Settings are read from $BFI_CONFIG or <config home>/bfi.toml;
  BFI_DEBUG and BFI_SHELL_MODE override them.
"#,
        program,
        env!("CARGO_PKG_VERSION")
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn print_version() {
    println!("bfi v{}", env!("CARGO_PKG_VERSION"));
    println!("Licensed under Apache-2.0");
    let _ = io::stdout().flush();
}

#[derive(Parser, Debug)]
#[command(name = "bfi", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Brainfuck source file to execute
    #[arg(value_name = "FILE", conflicts_with = "code")]
    file: Option<PathBuf>,

    /// Execute CODE instead of reading a file
    #[arg(short = 'c', long = "code", value_name = "CODE", allow_hyphen_values = true)]
    code: Option<String>,

    /// Trace every executed step to stderr
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Force non-interactive bare shell mode
    #[arg(long = "bare", conflicts_with = "editor")]
    bare: bool,

    /// Force interactive editor shell mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    editor: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    /// Show version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::SetTrue)]
    version: bool,
}

fn main() {
    // Program name for messages, without the directory part
    let program = env::args()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("bfi"));

    let cli = Cli::parse();

    if cli.help {
        print_usage_and_exit(&program, 0);
    }
    if cli.version {
        print_version();
        std::process::exit(0);
    }

    let config = Config::load();
    let debug = cli.debug || config.debug;

    // An empty `-c` falls through to the shell
    let code = if let Some(code) = cli.code.filter(|c| !c.is_empty()) {
        commands::exec::run(&program, ProgramSource::Code(code), debug)
    } else if let Some(path) = cli.file {
        commands::exec::run(&program, ProgramSource::File(path), debug)
    } else {
        let mode_flag = if cli.bare {
            ModeFlagOverride::Bare
        } else if cli.editor {
            ModeFlagOverride::Editor
        } else {
            ModeFlagOverride::None
        };
        commands::shell::run(&program, mode_flag, &config, debug)
    };

    std::process::exit(code);
}
