use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use cross_xdg::BaseDirs;
use nu_ansi_term::Color;

/// File name looked up in the XDG config home.
pub const CONFIG_FILE: &str = "bfi.toml";

/// Shell front-end to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    Bare,
    Editor,
}

impl ShellMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bare" => Some(ShellMode::Bare),
            "editor" => Some(ShellMode::Editor),
            _ => None,
        }
    }
}

/// Highlight colours for instruction characters in the shell editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub op_right: Color,    // '>'
    pub op_left: Color,     // '<'
    pub op_inc: Color,      // '+'
    pub op_dec: Color,      // '-'
    pub op_output: Color,   // '.'
    pub op_input: Color,    // ','
    pub op_bracket: Color,  // '[' and ']'
    pub non_bf: Color,
}

impl Default for Colors {
    fn default() -> Self {
        // Catppuccin Mocha accents
        Self {
            op_right: Color::Rgb(137, 220, 235),
            op_left: Color::Rgb(148, 226, 213),
            op_inc: Color::Rgb(166, 227, 161),
            op_dec: Color::Rgb(243, 139, 168),
            op_output: Color::Rgb(249, 226, 175),
            op_input: Color::Rgb(250, 179, 135),
            op_bracket: Color::Rgb(203, 166, 247),
            non_bf: Color::Rgb(205, 214, 244),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub prompt: String,
    pub mode: Option<ShellMode>,
    pub history_size: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "bfi".to_string(),
            mode: None,
            history_size: 1_000,
        }
    }
}

/// Settings read from `bfi.toml` plus environment overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Trace every executed step to stderr.
    pub debug: bool,
    pub shell: ShellConfig,
    pub colors: Colors,
}

impl Config {
    /// Load `$BFI_CONFIG` or `<config home>/bfi.toml`, then apply `BFI_DEBUG`.
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let mut cfg = config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default();

        if let Some(debug) = env::var("BFI_DEBUG").ok().as_deref().and_then(parse_bool) {
            cfg.debug = debug;
        }
        cfg
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        Some(Self::from_toml_str(&content))
    }

    /// Very small hand-rolled reader for the handful of keys we support.
    /// Unknown sections, keys and malformed values are ignored.
    pub fn from_toml_str(content: &str) -> Self {
        let sections = parse_sections(content);
        let mut cfg = Config::default();

        // `[interpreter] debug` is accepted too; `[shell]` wins when both are set
        if let Some(interp) = sections.get("interpreter") {
            if let Some(v) = interp.get("debug").and_then(|s| parse_bool(s)) {
                cfg.debug = v;
            }
        }

        if let Some(shell) = sections.get("shell") {
            if let Some(v) = shell.get("debug").and_then(|s| parse_bool(s)) {
                cfg.debug = v;
            }
            if let Some(prompt) = shell.get("prompt") {
                cfg.shell.prompt = prompt.clone();
            }
            if let Some(mode) = shell.get("mode").and_then(|s| ShellMode::parse(s)) {
                cfg.shell.mode = Some(mode);
            }
            if let Some(size) = shell.get("history_size").and_then(|s| s.parse::<usize>().ok()) {
                cfg.shell.history_size = size.max(1);
            }
        }

        if let Some(colors) = sections.get("colors") {
            macro_rules! set {
                ($field:ident, $key:literal) => {
                    if let Some(v) = colors.get($key).and_then(|s| parse_color(s)) { cfg.colors.$field = v; }
                };
            }

            set!(op_right, "op_right");
            set!(op_left, "op_left");
            set!(op_inc, "op_inc");
            set!(op_dec, "op_dec");
            set!(op_output, "op_output");
            set!(op_input, "op_input");
            set!(op_bracket, "op_bracket");
            set!(non_bf, "non_bf");
        }

        cfg
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os("BFI_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE);
    Some(path)
}

fn parse_sections(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            current = Some(line[1..line.len()-1].trim().to_string());
            continue;
        }
        let Some(section) = current.as_ref() else { continue; };
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq+1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len()-1].to_string()
            } else { val_raw.to_string() };
            sections.entry(section.clone()).or_default().insert(key, val);
        }
    }

    sections
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        return None;
    }

    let name = s.to_ascii_lowercase();
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "lightgray" | "light_gray" => Color::LightGray,
        "darkgray" | "dark_grey" | "darkgrey" | "dark_gray" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightyellow" | "light_yellow" => Color::LightYellow,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightmagenta" | "light_magenta" | "lightpurple" | "light_purple" => Color::LightPurple,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str(""), Config::default());
    }

    #[test]
    fn reads_known_sections() {
        let cfg = Config::from_toml_str(
            r##"
# comment
[interpreter]
debug = on

[shell]
prompt = "bf"
mode = bare
history_size = 50

[colors]
op_inc = "#010203"
op_bracket = cyan
non_bf = "not a colour"
"##,
        );
        assert!(cfg.debug);
        assert_eq!(cfg.shell.prompt, "bf");
        assert_eq!(cfg.shell.mode, Some(ShellMode::Bare));
        assert_eq!(cfg.shell.history_size, 50);
        assert_eq!(cfg.colors.op_inc, Color::Rgb(1, 2, 3));
        assert_eq!(cfg.colors.op_bracket, Color::Cyan);
        assert_eq!(cfg.colors.non_bf, Colors::default().non_bf);
    }

    #[test]
    fn shell_section_sets_debug() {
        let cfg = Config::from_toml_str("[shell]\ndebug = true\n");
        assert!(cfg.debug);

        let cfg = Config::from_toml_str("[interpreter]\ndebug = on\n[shell]\ndebug = off\n");
        assert!(!cfg.debug);
    }

    #[test]
    fn keys_outside_sections_are_ignored() {
        let cfg = Config::from_toml_str("debug = true\n[shell]\nmode = sideways\n");
        assert!(!cfg.debug);
        assert_eq!(cfg.shell.mode, None);
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[shell]\nprompt = trbf").unwrap();
        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.shell.prompt, "trbf");
        assert!(Config::load_from(Path::new("/definitely/not/here/bfi.toml")).is_none());
    }

    #[test]
    fn bool_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
