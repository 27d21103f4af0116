use crate::{DerivedView, EtlSummary, HealthStatus, JobRunState, QueryState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub health: HealthStatus,
    pub health_label: &'static str,
    pub status: String,
    pub query: QueryState,
    pub derived: DerivedView,
    pub job: JobRunState,
    /// False for the whole duration of an ETL run, refresh included.
    pub run_enabled: bool,
    pub last_etl: Option<EtlSummary>,
    pub dirty: bool,
}
