//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, EnvGuardTheme, UserInterface};

/// Terminal UI implementation.
///
/// Plain messages and successes go to stdout; warnings and errors go to
/// stderr so that `--json` output stays machine-readable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: EnvGuardTheme,
}

impl TerminalUI {
    /// Create a new terminal UI, picking a theme from the environment.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            EnvGuardTheme::new()
        } else {
            EnvGuardTheme::plain()
        };
        Self::with_theme(theme)
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(theme: EnvGuardTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn theme(&self) -> &EnvGuardTheme {
        &self.theme
    }
}
