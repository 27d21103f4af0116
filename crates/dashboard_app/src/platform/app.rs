use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use dashboard_core::{present, update, AppState, Msg, PresentationSink};
use dashboard_logging::{dash_debug, dash_info};

use super::config::{config_path, load_config};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::TerminalSink;

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let path = config_path();
    let config = load_config(&path)?;
    logging::initialize(config.log_destination);
    dash_info!(
        "Starting dashboard against {} (config {})",
        config.api_base,
        path.display()
    );

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.transport_settings(), app_tx.clone())
        .context("failed to start the API engine")?;

    let mut sink = TerminalSink::new(io::stdout());
    sink.print_text(HELP);

    spawn_input_reader(app_tx.clone());
    if let Some(interval) = config.health_interval() {
        spawn_health_timer(interval, app_tx.clone());
    }
    drop(app_tx);

    let mut dispatcher = Dispatcher::new(runner);
    dispatcher.dispatch(Msg::Started, &mut sink);

    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Msg(msg) => dispatcher.dispatch(msg, &mut sink),
            AppEvent::Quit => break,
        }
    }

    dash_info!("Dashboard stopped");
    Ok(())
}

/// Owns the state and applies messages one at a time, in arrival order.
pub struct Dispatcher {
    state: AppState,
    runner: EffectRunner,
}

impl Dispatcher {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    pub fn dispatch(&mut self, msg: Msg, sink: &mut dyn PresentationSink) {
        dash_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.consume_dirty().then(|| state.view());
        self.state = state;

        self.runner.enqueue(effects);
        if let Some(view) = view {
            present(&view, sink);
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::Started => "Started",
        Msg::LimitChanged(_) => "LimitChanged",
        Msg::OffsetChanged(_) => "OffsetChanged",
        Msg::SearchChanged(_) => "SearchChanged",
        Msg::RefreshRequested => "RefreshRequested",
        Msg::RunRequested => "RunRequested",
        Msg::HealthCheckRequested => "HealthCheckRequested",
        Msg::HealthProbed(_) => "HealthProbed",
        Msg::DataLoaded { .. } => "DataLoaded",
        Msg::EtlFinished(_) => "EtlFinished",
        Msg::NoOp => "NoOp",
    }
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line) {
                Command::Msg(msg) => AppEvent::Msg(msg),
                Command::Quit => AppEvent::Quit,
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                Command::Empty => continue,
                Command::Unknown(word) => {
                    println!("Unknown command {word:?}. Type `help` for the list.");
                    continue;
                }
            };
            if app_tx.send(event).is_err() {
                return;
            }
        }
        // stdin closed
        let _ = app_tx.send(AppEvent::Quit);
    });
}

fn spawn_health_timer(interval: Duration, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if app_tx
            .send(AppEvent::Msg(Msg::HealthCheckRequested))
            .is_err()
        {
            break;
        }
    });
}
