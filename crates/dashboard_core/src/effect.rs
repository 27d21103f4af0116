use crate::{QueryState, RequestId};

/// IO requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page with `limit`/`offset` from `query`.
    FetchData {
        request_id: RequestId,
        query: QueryState,
    },
    ProbeHealth,
    /// POST the ETL trigger. Emitted at most once per run.
    RunEtl,
}
