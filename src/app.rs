use anyhow::Result;

use crate::{
    channel,
    cli::{Cli, Command},
    domain, infra, ui,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let (context, _log_guard) =
                bootstrap::bootstrap(cli.config.as_deref(), cli.endpoint.as_deref())?;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                channel = channel::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let mut shell = bootstrap::compose_shell(&context)?;
            let outcome = ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            );

            if let Err(error) = &outcome {
                tracing::error!(code = "APP_SHELL_FAILED", error = ?error, "TUI shell failed");
            }
            outcome?;
        }
    }

    Ok(())
}
