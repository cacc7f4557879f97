//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ProjectContext`] for the config-related global flags
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, EnvGuardConfig};
use crate::error::{EnvGuardError, Result};
use crate::service::ApplicationService;
use crate::ui::UserInterface;

/// Exit code when a resource fails its pairing check.
pub const EXIT_MISMATCH: i32 = 1;

/// Exit code when no configuration could be found.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where to find the configuration and which application to check for.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    /// Directory the config search starts from.
    pub project_root: PathBuf,
    /// Explicit config file, bypassing the search.
    pub config_path: Option<PathBuf>,
    /// Application name overriding the config's `application`.
    pub application: Option<String>,
}

impl ProjectContext {
    /// Create a context rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Use an explicit config file.
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Override the application name.
    pub fn with_application(mut self, name: impl Into<String>) -> Self {
        self.application = Some(name.into());
        self
    }

    /// Load the configuration.
    ///
    /// `Ok(None)` means no config was found; the caller has already been
    /// told via `ui`.
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<Option<EnvGuardConfig>> {
        match load_config(&self.project_root, self.config_path.as_deref()) {
            Ok((_, config)) => Ok(Some(config)),
            Err(EnvGuardError::ConfigNotFound { path }) => {
                ui.error(&format!(
                    "No configuration found at {}. Create .envguard/config.yml or pass --config.",
                    path.display()
                ));
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Load the configuration and build the application service.
    pub fn service(&self, ui: &mut dyn UserInterface) -> Result<Option<ApplicationService>> {
        match self.load(ui)? {
            Some(config) => config.build_service(self.application.as_deref()).map(Some),
            None => Ok(None),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            context: ProjectContext::new(project_root),
        }
    }

    /// Create a dispatcher from an explicit context.
    pub fn with_context(context: ProjectContext) -> Self {
        Self { context }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.context.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// The global `--config` and `--application` flags are folded into the
    /// context before routing.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut context = self.context.clone();
        if let Some(path) = &cli.config {
            context.config_path = Some(path.clone());
        }
        if let Some(name) = &cli.application {
            context.application = Some(name.clone());
        }

        match &cli.command {
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Commands::Resolve(args) => {
                let cmd = super::resolve::ResolveCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
