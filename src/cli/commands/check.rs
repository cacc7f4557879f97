//! Check command implementation.
//!
//! The `envguard check` command validates that each named resource pairs
//! with the application's environment.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::error::{EnvGuardError, Result, UNKNOWN_ENVIRONMENT};
use crate::service::ApplicationService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext, EXIT_MISMATCH, EXIT_NO_CONFIG};

/// Outcome for one resource, as emitted by `--json`.
#[derive(Debug, Serialize)]
struct CheckReport {
    resource: String,
    passed: bool,
    pairing: String,
    #[serde(skip)]
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// The check command implementation.
pub struct CheckCommand {
    context: ProjectContext,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: ProjectContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn check_one(&self, service: &ApplicationService, resource: &str) -> Result<CheckReport> {
        let metadata = service.resolver().fetch_metadata(resource);
        let pairing = service.resolver().pairing_for(metadata.as_ref());
        let outcome =
            service.validate_metadata_pairing(resource, metadata.as_ref(), self.args.permit_fuzzy);
        let (passed, error) = match outcome {
            Ok(()) => (true, None),
            Err(e) if e.is_mismatch() => (false, Some(e.to_string())),
            Err(e) => return Err(e),
        };

        Ok(CheckReport {
            resource: resource.to_string(),
            passed,
            pairing: pairing.to_string(),
            matched: pairing.is_match(),
            resource_environment: metadata.and_then(|m| m.environment),
            error,
        })
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(service) = self.context.service(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let reports = self
            .args
            .resources
            .iter()
            .map(|resource| self.check_one(&service, resource))
            .collect::<Result<Vec<_>>>()?;
        let all_passed = reports.iter().all(|r| r.passed);

        if self.args.json {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| EnvGuardError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let application = service.resolver().application_environment_type().name();
            for report in &reports {
                let environment = report
                    .resource_environment
                    .as_deref()
                    .unwrap_or(UNKNOWN_ENVIRONMENT);
                let line = format!("{} ({}): {}", report.resource, environment, report.pairing);
                match &report.error {
                    Some(error) => ui.error(error),
                    None if report.matched => ui.success(&format!("{}, {}", line, application)),
                    None => ui.warning(&line),
                }
            }
        }

        if all_passed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_MISMATCH))
        }
    }
}
