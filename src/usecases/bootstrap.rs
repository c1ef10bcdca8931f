use std::{path::Path, sync::mpsc};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    channel::WsConnectionManager,
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    ui::CrosstermEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator, TextChannel},
        shell::DefaultShellOrchestrator,
    },
};

/// The event source and orchestrator the TUI loop runs on.
pub struct ComposedShell {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

/// Loads config and starts logging. The guard must be held until exit.
pub fn bootstrap(
    config_path: Option<&Path>,
    endpoint_override: Option<&str>,
) -> Result<(AppContext, WorkerGuard), AppError> {
    let context = build_context(config_path, endpoint_override)?;
    let guard = infra::logging::init(&context.config.logging, &context.layout)?;

    tracing::debug!(
        log_file = %context.layout.log_file(&context.config.logging.file).display(),
        endpoint = %context.endpoint,
        "bootstrap completed"
    );

    Ok((context, guard))
}

fn build_context(
    config_path: Option<&Path>,
    endpoint_override: Option<&str>,
) -> Result<AppContext, AppError> {
    let config = FileConfigAdapter::new(config_path)
        .with_endpoint(endpoint_override)
        .load()?;
    let endpoint = config.server.endpoint_url()?;
    let layout = StorageLayout::resolve()?;

    Ok(AppContext::new(config, endpoint, layout))
}

/// Wires the live channel into the shell and starts connecting, exactly once.
pub fn compose_shell(context: &AppContext) -> Result<ComposedShell, AppError> {
    let (events_tx, events_rx) = mpsc::channel();

    let mut channel =
        WsConnectionManager::new(events_tx, context.config.server.greeting.clone())?;
    channel.connect(&context.endpoint);

    Ok(ComposedShell {
        event_source: Box::new(CrosstermEventSource::new(events_rx)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(channel)),
    })
}
