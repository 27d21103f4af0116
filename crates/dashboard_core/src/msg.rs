use crate::{DataPage, EtlSummary, HealthStatus, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard opened: probe health and load the first page.
    Started,
    /// User edited the limit input (raw text).
    LimitChanged(String),
    /// User edited the offset input (raw text).
    OffsetChanged(String),
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked Refresh.
    RefreshRequested,
    /// User clicked Run ETL.
    RunRequested,
    /// Timer or user asked for a new liveness probe.
    HealthCheckRequested,
    /// Engine finished a liveness probe.
    HealthProbed(HealthStatus),
    /// Engine finished a data fetch.
    DataLoaded {
        request_id: RequestId,
        result: Result<DataPage, String>,
    },
    /// Engine finished the ETL request.
    EtlFinished(Result<EtlSummary, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
