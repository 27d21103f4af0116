use std::sync::Arc;

use dashboard_core::EtlSummary;
use dashboard_logging::dash_info;

use crate::{ApiError, ErrorKind, Request, Transport};

pub const ETL_RUN_PATH: &str = "/etl/run";

/// Issues the long-running ETL request.
///
/// Mutual exclusion is owned by the core state machine, which emits at most
/// one run at a time; this type only performs the call.
#[derive(Clone)]
pub struct JobTrigger {
    transport: Arc<dyn Transport>,
}

impl JobTrigger {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn run(&self) -> Result<EtlSummary, ApiError> {
        dash_info!("Triggering ETL run");
        let payload = self.transport.request(&Request::post(ETL_RUN_PATH)).await?;
        serde_json::from_value(payload)
            .map_err(|err| ApiError::new(ErrorKind::Parse, format!("unexpected ETL payload: {err}")))
    }
}
