//! List command implementation.
//!
//! The `envguard list` command lists the registered environment types.

use crate::cli::args::ListArgs;
use crate::error::{EnvGuardError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext, EXIT_NO_CONFIG};

/// The list command implementation.
pub struct ListCommand {
    context: ProjectContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: ProjectContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.context.load(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };
        let registry = config.build_registry()?;
        let types = registry.by_sensitivity();

        if self.args.json {
            let json = serde_json::to_string_pretty(&types)
                .map_err(|e| EnvGuardError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        ui.message(&format!("  {}", theme.key.apply_to("Environment types:")));
        for environment_type in types {
            let acronyms = if environment_type.acronyms().is_empty() {
                String::new()
            } else {
                format!(" [{}]", environment_type.acronyms().join(", "))
            };
            ui.message(&format!(
                "    {}{} {}",
                theme.highlight.apply_to(environment_type.name()),
                acronyms,
                theme
                    .dim
                    .apply_to(format!("sensitivity {}", environment_type.sensitivity()))
            ));
            ui.message(&format!(
                "      {}",
                theme.dim.apply_to(environment_type.description())
            ));
        }

        Ok(CommandResult::success())
    }
}
