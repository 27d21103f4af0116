//! Dashboard core: pure state machine, projection and view-model helpers.
mod effect;
mod msg;
mod projection;
mod query;
mod sink;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use projection::{normalize_search, project, DerivedView, PLACEHOLDER};
pub use query::{parse_limit, parse_offset, QueryState, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use sink::{present, PresentationSink};
pub use state::AppState;
pub use types::{DataPage, EtlSummary, HealthStatus, JobRunState, Record, RequestId};
pub use update::{update, STATUS_ETL_BUSY, STATUS_ETL_RUNNING, STATUS_LOADING, STATUS_OK};
pub use view_model::AppViewModel;
