//! Color and formatting utilities for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether stdout should receive ANSI escapes.
///
/// `NO_COLOR` and `FORCE_COLOR=0` turn colours off, any other `FORCE_COLOR`
/// turns them on. Otherwise stdout must be a terminal with a known-capable
/// `TERM`.
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Some(force) = env::var_os("FORCE_COLOR") {
        return force != "0";
    }
    if cfg!(test) || !std::io::stdout().is_terminal() {
        return false;
    }

    env::var("TERM").is_ok_and(|term| term_supports_color(&term))
}

fn term_supports_color(term: &str) -> bool {
    const PREFIXES: [&str; 4] = ["xterm", "screen", "tmux", "rxvt"];

    !term.is_empty()
        && term != "dumb"
        && (term == "linux"
            || term.contains("color")
            || term.contains("256")
            || PREFIXES.iter().any(|prefix| term.starts_with(prefix)))
}
