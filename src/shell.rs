//! Line-oriented command shell around one [`Interpreter`].

use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use reedline::{DefaultPrompt, DefaultPromptSegment, Highlighter, Signal, StyledText};
use nu_ansi_term::Style;

use crate::cli_util::print_interpreter_error;
use crate::config::{Colors, Config, ShellMode};
use crate::trace::StderrTracer;
use crate::Interpreter;

/// Files larger than this are refused by `load`.
pub const MAX_FILE_BYTES: u64 = 1_000_000;
/// Programs longer than this are refused by `code`.
pub const MAX_CODE_BYTES: usize = 10_000;
/// How much of the source `show` prints.
const SHOW_BYTES: usize = 200;

const HELP: &str = "\
Brainfuck interpreter commands:
  load <file.bf>     - Load brainfuck program from file
  code <program>     - Load brainfuck program from command line
  run (or r)         - Execute loaded brainfuck program
  reset              - Reset interpreter state (clear memory)
  dump [start] [cnt] - Show memory contents
  debug [on|off]     - Toggle debug mode (shows step-by-step)
  show (or s)        - Show loaded brainfuck program
  clear (or c)       - Clear loaded program
  status             - Show interpreter status
  help (or h)        - Show this help
  exit/quit/q        - Exit the shell

Tips:
  - Debug output goes to stderr
  - Characters other than +-<>[]., are ignored
  - Memory is limited to 1,000,000 cells
";

/// Whether the shell keeps reading commands after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell state: the interpreter plus the source text it was loaded from.
#[derive(Debug, Default)]
pub struct Shell {
    interpreter: Interpreter,
    source: Vec<u8>,
}

impl Shell {
    pub fn new(debug: bool) -> Self {
        let mut interpreter = Interpreter::new();
        interpreter.set_debug(debug);
        Self {
            interpreter,
            source: Vec::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn has_program(&self) -> bool {
        !self.source.is_empty()
    }

    /// Run one command line. Responses and program output go to `out`;
    /// execution errors and the debug trace go to stderr.
    pub fn handle_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };

        match cmd {
            "exit" | "quit" | "q" => return Ok(Flow::Exit),
            "help" | "h" => write!(out, "{HELP}")?,
            "load" => self.cmd_load(args, out)?,
            "code" => self.cmd_code(args, out)?,
            "run" | "r" => self.cmd_run(out)?,
            "reset" => {
                self.interpreter.reset();
                writeln!(out, "Interpreter reset")?;
            }
            "dump" => self.cmd_dump(args, out)?,
            "debug" | "d" => match args.first().map(|a| a.to_ascii_lowercase()).as_deref() {
                Some("on") => {
                    self.interpreter.set_debug(true);
                    writeln!(out, "Debug mode on")?;
                }
                Some("off") => {
                    self.interpreter.set_debug(false);
                    writeln!(out, "Debug mode off")?;
                }
                _ => writeln!(out, "Usage: debug [on|off]")?,
            },
            "show" | "s" => {
                if self.has_program() {
                    let shown = &self.source[..self.source.len().min(SHOW_BYTES)];
                    writeln!(
                        out,
                        "Program ({} instructions): {}",
                        self.interpreter.instruction_count(),
                        String::from_utf8_lossy(shown)
                    )?;
                } else {
                    writeln!(out, "No program loaded")?;
                }
            }
            "clear" | "c" => {
                self.source.clear();
                self.interpreter.load("");
                writeln!(out, "Program cleared")?;
            }
            "status" => {
                writeln!(out, "Status:")?;
                writeln!(out, "  Program loaded: {}", if self.has_program() { "Yes" } else { "No" })?;
                writeln!(out, "  Instructions: {}", self.interpreter.instruction_count())?;
                writeln!(out, "  Memory pointer: {}", self.interpreter.pointer())?;
                writeln!(out, "  Debug mode: {}", if self.interpreter.debug() { "On" } else { "Off" })?;
            }
            other => writeln!(out, "Unknown command: {other}")?,
        }

        out.flush()?;
        Ok(Flow::Continue)
    }

    fn cmd_load<W: Write + ?Sized>(&mut self, args: &[&str], out: &mut W) -> io::Result<()> {
        let Some(&filename) = args.first() else {
            return writeln!(out, "Usage: load <file.bf>");
        };
        if filename.contains("..") {
            return writeln!(out, "Error: Invalid filename");
        }

        let path = Path::new(filename);
        let Ok(meta) = fs::metadata(path) else {
            return writeln!(out, "Error: Cannot open file");
        };
        if meta.len() > MAX_FILE_BYTES {
            return writeln!(out, "Error: File too large");
        }
        let Ok(bytes) = fs::read(path) else {
            return writeln!(out, "Error: Cannot open file");
        };

        self.interpreter.load(&bytes);
        self.source = bytes;
        writeln!(
            out,
            "Loaded {} instructions from {filename}",
            self.interpreter.instruction_count()
        )
    }

    fn cmd_code<W: Write + ?Sized>(&mut self, args: &[&str], out: &mut W) -> io::Result<()> {
        if args.is_empty() {
            return writeln!(out, "Usage: code <program>");
        }
        let program = args.join(" ");
        if program.len() > MAX_CODE_BYTES {
            return writeln!(out, "Error: Program too long");
        }

        self.interpreter.load(&program);
        self.source = program.into_bytes();
        writeln!(out, "Loaded {} instructions", self.interpreter.instruction_count())
    }

    fn cmd_run<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.has_program() {
            return writeln!(out, "No program loaded.");
        }

        let stdin = io::stdin();
        let result = self
            .interpreter
            .execute_with(&mut stdin.lock(), &mut *out, &mut StderrTracer);
        // Keep the next response at column 0
        writeln!(out)?;

        if let Err(err) = result {
            let code = self.interpreter.program().to_string();
            print_interpreter_error(None, &code, &err);
            writeln!(out, "Program failed.")?;
        }
        Ok(())
    }

    fn cmd_dump<W: Write + ?Sized>(&self, args: &[&str], out: &mut W) -> io::Result<()> {
        let parsed: Result<Vec<usize>, _> = args.iter().take(2).map(|a| a.parse::<usize>()).collect();
        let Ok(numbers) = parsed else {
            return writeln!(out, "Usage: dump [start] [count]");
        };
        let start = numbers.first().copied().unwrap_or(0);
        let count = numbers.get(1).copied().unwrap_or(16).max(1);

        let tape = self.interpreter.tape();
        let Some(cells) = tape.window(start, count) else {
            return writeln!(
                out,
                "Error: Start position {start} exceeds memory size {}",
                tape.len()
            );
        };

        let rendered: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                if start + offset == tape.pointer() {
                    format!("[{value}]")
                } else {
                    value.to_string()
                }
            })
            .collect();
        writeln!(
            out,
            "Memory [{start}-{}]: {}",
            start + cells.len() - 1,
            rendered.join(" ")
        )
    }
}

/// Bare mode: read commands line by line from stdin until EOF or `exit`.
/// No prompt, no banner.
pub fn run_bare(shell: &mut Shell) -> io::Result<()> {
    loop {
        let mut line = String::new();
        // Lock per line so `,` inside `run` can read the same stdin
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let stdout = io::stdout();
        if shell.handle_line(&line, &mut stdout.lock())? == Flow::Exit {
            return Ok(());
        }
    }
}

/// Editor mode: reedline prompt with highlighting and in-memory history.
pub fn run_editor(shell: &mut Shell, config: &Config) -> io::Result<()> {
    let mut editor = init_line_editor(config)?;
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(config.shell.prompt.clone()),
        DefaultPromptSegment::Empty,
    );

    loop {
        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let stdout = io::stdout();
                if shell.handle_line(&line, &mut stdout.lock())? == Flow::Exit {
                    break;
                }
            }
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => break,
            Err(e) => {
                eprintln!("shell: editor error: {e}");
                let _ = io::stderr().flush();
                break;
            }
        }
    }

    if io::stderr().is_terminal() {
        eprintln!("Goodbye!");
        let _ = io::stderr().flush();
    }
    Ok(())
}

fn init_line_editor(config: &Config) -> io::Result<reedline::Reedline> {
    use reedline::{default_emacs_keybindings, Emacs, FileBackedHistory, Reedline};

    let history = FileBackedHistory::new(config.shell.history_size)
        .map_err(|e| io::Error::other(e.to_string()))?;

    let editor = Reedline::create()
        .with_highlighter(Box::new(BrainfuckHighlighter::new(&config.colors)))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(default_emacs_keybindings())));

    Ok(editor)
}

/// Flag override for shell mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

/// Pick the shell mode: flag, then `BFI_SHELL_MODE`, then the config file,
/// then editor iff stdin is a TTY.
pub fn select_mode(flag: ModeFlagOverride, configured: Option<ShellMode>) -> Result<ShellMode, String> {
    let stdin_tty = io::stdin().is_terminal();
    let require_tty = |source: &str| {
        if stdin_tty {
            Ok(ShellMode::Editor)
        } else {
            Err(format!("cannot start editor: stdin is not a TTY (use {source})"))
        }
    };

    match flag {
        ModeFlagOverride::Bare => return Ok(ShellMode::Bare),
        ModeFlagOverride::Editor => return require_tty("--bare or BFI_SHELL_MODE=bare"),
        ModeFlagOverride::None => {}
    }

    if let Ok(val) = env::var("BFI_SHELL_MODE") {
        return match ShellMode::parse(&val) {
            Some(ShellMode::Bare) => Ok(ShellMode::Bare),
            Some(ShellMode::Editor) => require_tty("BFI_SHELL_MODE=bare"),
            None => Err(format!("invalid BFI_SHELL_MODE value: {val}, must be 'bare' or 'editor'")),
        };
    }

    match configured {
        Some(ShellMode::Bare) => return Ok(ShellMode::Bare),
        Some(ShellMode::Editor) => return require_tty("mode = bare in the config file"),
        None => {}
    }

    if stdin_tty {
        Ok(ShellMode::Editor)
    } else {
        Ok(ShellMode::Bare)
    }
}

struct BrainfuckHighlighter {
    colors: Colors,
}

impl BrainfuckHighlighter {
    fn new(colors: &Colors) -> Self {
        Self { colors: colors.clone() }
    }

    #[inline]
    fn style_for(&self, ch: char) -> Style {
        // > <   => movement
        // + -   => data modification
        // . ,   => I/O
        // [ ]   => flow control
        let c = &self.colors;
        match ch {
            '>' => Style::new().fg(c.op_right).bold(),
            '<' => Style::new().fg(c.op_left).bold(),
            '+' => Style::new().fg(c.op_inc).bold(),
            '-' => Style::new().fg(c.op_dec).bold(),
            '.' => Style::new().fg(c.op_output).bold(),
            ',' => Style::new().fg(c.op_input).bold(),
            '[' | ']' => Style::new().fg(c.op_bracket).bold(),
            _ => Style::new().fg(c.non_bf),
        }
    }
}

impl Highlighter for BrainfuckHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out: StyledText = StyledText::new();
        let mut current_style: Option<Style> = None;
        let mut buffer = String::new();

        for ch in line.chars() {
            let style = self.style_for(ch);

            match current_style {
                Some(s) if s == style => buffer.push(ch),
                Some(s) => {
                    out.push((s, std::mem::take(&mut buffer)));
                    current_style = Some(style);
                    buffer.push(ch);
                }
                None => {
                    current_style = Some(style);
                    buffer.push(ch);
                }
            }
        }

        if let Some(s) = current_style {
            if !buffer.is_empty() {
                out.push((s, buffer));
            }
        }
        out
    }
}
