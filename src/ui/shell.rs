use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        endpoint = %context.endpoint,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;
    run_loop(event_source, orchestrator, |screen_orchestrator| {
        terminal.draw(|frame| view::render(frame, &screen_orchestrator.screen()))
    })?;

    tracing::info!("TUI shell stopped");
    Ok(())
}

/// Draws, then waits for one event, until the orchestrator stops running.
fn run_loop<D>(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    mut draw: D,
) -> Result<()>
where
    D: FnMut(&dyn ShellOrchestrator) -> Result<()>,
{
    while orchestrator.state().is_running() {
        draw(&*orchestrator)?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            channel::{ChannelEvent, ChannelState},
            events::{AppEvent, KeyInput},
        },
        test_support::FakeChannel,
        ui::event_source::MockEventSource,
        usecases::{contracts::TextChannel, shell::DefaultShellOrchestrator},
    };

    fn key(name: &str) -> AppEvent {
        AppEvent::InputKey(KeyInput::new(name, false))
    }

    fn connecting_orchestrator() -> DefaultShellOrchestrator<FakeChannel> {
        let mut channel = FakeChannel::default();
        channel.connect(&FakeChannel::endpoint_url());
        DefaultShellOrchestrator::new(channel)
    }

    #[test]
    fn loop_stops_on_quit_from_source() {
        let mut source = MockEventSource::from(vec![AppEvent::Tick, AppEvent::QuitRequested]);
        let mut orchestrator = connecting_orchestrator();
        let mut draws = 0;

        run_loop(&mut source, &mut orchestrator, |_| {
            draws += 1;
            Ok(())
        })
        .expect("loop should finish");

        assert!(!orchestrator.state().is_running());
        assert_eq!(draws, 2);
        assert_eq!(orchestrator.screen().channel_state, ChannelState::Closed);
    }

    #[test]
    fn full_session_appends_in_order() {
        let mut events = vec![
            AppEvent::Channel(ChannelEvent::Opened),
            AppEvent::Channel(ChannelEvent::Frame("welcome".to_owned())),
        ];
        events.extend(["h", "i"].map(key));
        events.push(key("enter"));
        events.push(AppEvent::Channel(ChannelEvent::Frame("echo: hi".to_owned())));
        events.push(AppEvent::QuitRequested);

        let mut source = MockEventSource::from(events);
        let mut orchestrator = connecting_orchestrator();
        let mut seen_connecting_only = false;

        run_loop(&mut source, &mut orchestrator, |current| {
            if !current.screen().has_opened {
                seen_connecting_only = true;
            }
            Ok(())
        })
        .expect("loop should finish");

        let screen = orchestrator.screen();
        let texts: Vec<&str> = screen.entries.map(|entry| entry.text.as_str()).collect();
        assert!(seen_connecting_only);
        assert_eq!(texts, vec!["welcome", "hi", "echo: hi"]);
        assert!(screen.shell.input().is_empty());
    }

    #[test]
    fn draw_errors_stop_the_loop() {
        let mut source = MockEventSource::from(vec![AppEvent::Tick]);
        let mut orchestrator = connecting_orchestrator();

        let result = run_loop(&mut source, &mut orchestrator, |_| {
            Err(anyhow::anyhow!("terminal gone"))
        });

        assert!(result.is_err());
        assert!(orchestrator.state().is_running());
    }
}
