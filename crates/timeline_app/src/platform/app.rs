use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use timeline_core::{update, Msg, TimelineState};
use timeline_engine::ReqwestTimelineClient;
use timeline_logging::{set_event_turn, timeline_info, timeline_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{parse_line, Command, HELP};
use super::ui::render::{print_lines, render, ConsoleNotifier};

/// Everything that can wake the event loop.
pub(crate) enum AppEvent {
    Msg(Msg),
    Command(Command),
    InvalidInput(String),
    InputClosed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let client = ReqwestTimelineClient::new(config.client_settings())
        .with_context(|| format!("invalid API endpoint {}", config.base_url))?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(
        Arc::new(client),
        Box::new(ConsoleNotifier),
        event_tx.clone(),
    );
    let state = TimelineState::with_settings(config.scheduler_settings());
    let mut context = TimelineContext::new(state, runner);

    spawn_poll_ticker(context.poll_interval(), event_tx.clone());
    spawn_console_reader(event_tx);

    timeline_info!("mediatimeline started against {}", config.base_url);
    print_lines(&[HELP.to_string()]);
    context.dispatch(Msg::Started);

    for event in event_rx {
        match event {
            AppEvent::Msg(msg) => context.dispatch(msg),
            AppEvent::Command(Command::Dispatch(msg)) => context.dispatch(msg),
            AppEvent::Command(Command::List) => context.render(),
            AppEvent::Command(Command::Help) => print_lines(&[HELP.to_string()]),
            AppEvent::InvalidInput(message) => print_lines(&[message]),
            AppEvent::Command(Command::Quit) | AppEvent::InputClosed => break,
        }
    }

    context.shutdown();
    Ok(())
}

/// Owns the timeline state for the lifetime of the loop. Only the loop thread
/// touches it, one event at a time.
struct TimelineContext {
    state: TimelineState,
    effects: EffectRunner,
    turn: u64,
}

impl TimelineContext {
    fn new(state: TimelineState, effects: EffectRunner) -> Self {
        Self {
            state,
            effects,
            turn: 0,
        }
    }

    fn poll_interval(&self) -> Duration {
        self.state.settings().poll_interval
    }

    fn dispatch(&mut self, msg: Msg) {
        self.turn += 1;
        set_event_turn(self.turn);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.render();
        }
    }

    fn render(&self) {
        print_lines(&render(&self.state.view()));
    }

    fn shutdown(self) {
        timeline_info!(
            "shutting down with {} cached tweets after {} events",
            self.state.collection().len(),
            self.turn
        );
    }
}

fn spawn_poll_ticker(interval: Duration, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if event_tx.send(AppEvent::Msg(Msg::PollTick)).is_err() {
            break;
        }
    });
}

fn spawn_console_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match parse_line(&line) {
                    Ok(Some(command)) => AppEvent::Command(command),
                    Ok(None) => continue,
                    Err(message) => AppEvent::InvalidInput(message),
                },
                Err(err) => {
                    timeline_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
