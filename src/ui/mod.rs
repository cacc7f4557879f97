//! Terminal output for the `envguard` binary.
//!
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use envguard::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("orders-db: DEV");
//! ui.success("All resources pair with Production");
//! assert_eq!(ui.messages(), &["orders-db: DEV".to_string()]);
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, EnvGuardTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// The theme used to style composite lines.
    fn theme(&self) -> &EnvGuardTheme;
}
