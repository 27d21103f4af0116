use std::sync::mpsc;
use std::thread;

use dashboard_core::{Effect, Msg};
use dashboard_engine::{EngineError, EngineEvent, EngineHandle, TransportSettings};
use dashboard_logging::{dash_debug, dash_info, dash_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: TransportSettings,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(settings, event_tx)?;
        spawn_event_loop(event_rx, app_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchData { request_id, query } => {
                    dash_debug!(
                        "FetchData request_id={} limit={} offset={}",
                        request_id,
                        query.limit,
                        query.offset
                    );
                    self.engine.fetch_data(request_id, query);
                }
                Effect::ProbeHealth => {
                    self.engine.probe_health();
                }
                Effect::RunEtl => {
                    dash_info!("RunEtl");
                    self.engine.run_etl();
                }
            }
        }
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DataLoaded { request_id, result } => Msg::DataLoaded {
            request_id,
            result: result.map_err(|err| {
                dash_warn!("Data request {} failed ({}): {}", request_id, err.kind, err);
                err.message
            }),
        },
        EngineEvent::HealthProbed(health) => Msg::HealthProbed(health),
        EngineEvent::EtlFinished(result) => Msg::EtlFinished(result.map_err(|err| {
            dash_warn!("ETL run failed ({}): {}", err.kind, err);
            err.message
        })),
    }
}
