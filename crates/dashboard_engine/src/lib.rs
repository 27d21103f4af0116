//! Dashboard engine: API transport and effect execution.
mod engine;
mod health;
mod job;
mod loader;
mod transport;
mod types;

pub use engine::EngineHandle;
pub use health::{HealthMonitor, HEALTH_PATH};
pub use job::{JobTrigger, ETL_RUN_PATH};
pub use loader::{DataLoader, DATA_PATH};
pub use transport::{
    http_error_message, parse_maybe_json, Method, ReqwestTransport, Request, Transport,
    TransportSettings, ERROR_BODY_PREVIEW_CHARS,
};
pub use types::{ApiError, EngineError, EngineEvent, ErrorKind};
