use std::sync::Arc;

use dashboard_core::HealthStatus;
use dashboard_logging::{dash_debug, dash_warn};

use crate::{Request, Transport};

pub const HEALTH_PATH: &str = "/health";

/// Reduces backend reachability to `Ok` or `Error`.
///
/// Holds no state of its own, so probes may overlap with each other and with
/// data loads.
#[derive(Clone)]
pub struct HealthMonitor {
    transport: Arc<dyn Transport>,
}

impl HealthMonitor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn probe(&self) -> HealthStatus {
        match self.transport.request(&Request::get(HEALTH_PATH)).await {
            Ok(_) => {
                dash_debug!("Health probe ok");
                HealthStatus::Ok
            }
            Err(err) => {
                dash_warn!("Health probe failed ({}): {}", err.kind, err);
                HealthStatus::Error
            }
        }
    }
}
