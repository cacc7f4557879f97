//! Resolve command implementation.
//!
//! The `envguard resolve` command shows what the provider chain knows about
//! a resource and which environment type that maps to.

use serde::Serialize;

use crate::cli::args::ResolveArgs;
use crate::environment::EnvironmentMetadata;
use crate::error::{EnvGuardError, Result, UNKNOWN_ENVIRONMENT};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext, EXIT_NO_CONFIG};

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    metadata: &'a EnvironmentMetadata,
    environment_type: Option<&'a str>,
    pairing: String,
}

/// The resolve command implementation.
pub struct ResolveCommand {
    context: ProjectContext,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(context: ProjectContext, args: ResolveArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(service) = self.context.service(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let resource = &self.args.resource;
        let resolver = service.resolver();
        let metadata = resolver.fetch_metadata(resource).ok_or_else(|| {
            EnvGuardError::contract_violation(
                "environment_metadata",
                format!("provider returned no metadata for '{}'", resource),
            )
        })?;
        let environment_type = resolver.resolve(&metadata);
        let pairing = resolver.pairing_for(Some(&metadata));

        if self.args.json {
            let report = ResolveReport {
                metadata: &metadata,
                environment_type: environment_type.map(|t| t.name()),
                pairing: pairing.to_string(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| EnvGuardError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let unknown = theme.dim.apply_to("-").to_string();
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| unknown.clone());

        ui.message(&format!("{}", theme.highlight.apply_to(resource)));
        ui.message(&format!(
            "  {}",
            theme.format_field(
                "Environment",
                metadata.environment.as_deref().unwrap_or(UNKNOWN_ENVIRONMENT)
            )
        ));
        ui.message(&format!("  {}", theme.format_field("Location", &field(&metadata.location))));
        ui.message(&format!(
            "  {}",
            theme.format_field("Resource type", &field(&metadata.resource_type))
        ));
        ui.message(&format!("  {}", theme.format_field("Instance", &field(&metadata.instance))));
        if let Some(emulated) = metadata.is_emulated {
            ui.message(&format!("  {}", theme.format_field("Emulated", &emulated.to_string())));
        }
        ui.message(&format!(
            "  {}",
            theme.format_field(
                "Environment type",
                environment_type.map(|t| t.name()).unwrap_or("unrecognized")
            )
        ));
        ui.message(&format!("  {}", theme.format_field("Pairing", &pairing.to_string())));

        Ok(CommandResult::success())
    }
}
