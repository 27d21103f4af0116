use std::sync::{mpsc, Arc};
use std::thread;

use dashboard_core::{HealthStatus, QueryState, RequestId};
use dashboard_logging::{dash_error, dash_warn};

use crate::{
    ApiError, DataLoader, EngineError, EngineEvent, ErrorKind, HealthMonitor, JobTrigger,
    ReqwestTransport, Transport, TransportSettings,
};

enum EngineCommand {
    FetchData {
        request_id: RequestId,
        query: QueryState,
    },
    ProbeHealth,
    RunEtl,
}

#[derive(Clone)]
struct Services {
    health: HealthMonitor,
    loader: DataLoader,
    job: JobTrigger,
}

impl Services {
    fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            health: HealthMonitor::new(transport.clone()),
            loader: DataLoader::new(transport.clone()),
            job: JobTrigger::new(transport),
        }
    }
}

/// Runs API calls on a background tokio runtime and reports each outcome
/// as exactly one [`EngineEvent`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: TransportSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let transport = Arc::new(ReqwestTransport::new(settings)?);
        Self::with_transport(transport, event_tx)
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let services = Services::new(transport);
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let services = services.clone();
                let reply = Reply::for_command(&command, event_tx.clone());
                runtime.spawn(async move {
                    handle_command(&services, command, reply).await;
                });
            }
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch_data(&self, request_id: RequestId, query: QueryState) {
        self.send(EngineCommand::FetchData { request_id, query });
    }

    pub fn probe_health(&self) {
        self.send(EngineCommand::ProbeHealth);
    }

    pub fn run_etl(&self) {
        self.send(EngineCommand::RunEtl);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dash_error!("Engine thread has stopped; command dropped");
        }
    }
}

async fn handle_command(services: &Services, command: EngineCommand, reply: Reply) {
    let event = match command {
        EngineCommand::FetchData { request_id, query } => EngineEvent::DataLoaded {
            request_id,
            result: services.loader.load(&query).await,
        },
        EngineCommand::ProbeHealth => EngineEvent::HealthProbed(services.health.probe().await),
        EngineCommand::RunEtl => EngineEvent::EtlFinished(services.job.run().await),
    };
    reply.send(event);
}

/// Completion guard for one command.
///
/// If the task ends without replying (panic, runtime shutdown) the failure
/// event is sent from `Drop`, so the ETL control can never stay disabled.
struct Reply {
    tx: mpsc::Sender<EngineEvent>,
    fallback: Option<EngineEvent>,
}

impl Reply {
    fn for_command(command: &EngineCommand, tx: mpsc::Sender<EngineEvent>) -> Self {
        let aborted = || ApiError::new(ErrorKind::Network, "request aborted");
        let fallback = match command {
            EngineCommand::FetchData { request_id, .. } => EngineEvent::DataLoaded {
                request_id: *request_id,
                result: Err(aborted()),
            },
            EngineCommand::ProbeHealth => EngineEvent::HealthProbed(HealthStatus::Error),
            EngineCommand::RunEtl => EngineEvent::EtlFinished(Err(aborted())),
        };
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn send(mut self, event: EngineEvent) {
        self.fallback = None;
        let _ = self.tx.send(event);
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            dash_warn!("Engine task ended without a result; reporting failure");
            let _ = self.tx.send(event);
        }
    }
}
