use crate::projection::project;
use crate::view_model::AppViewModel;
use crate::{
    DataPage, DerivedView, EtlSummary, HealthStatus, JobRunState, QueryState, RequestId,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query: QueryState,
    page: Option<DataPage>,
    derived: DerivedView,
    health: HealthStatus,
    job: JobRunState,
    /// Fetch whose resolution ends the current ETL run.
    job_refresh: Option<RequestId>,
    last_etl: Option<EtlSummary>,
    status: String,
    next_request_id: RequestId,
    newest_resolved: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            health: self.health,
            health_label: self.health.label(),
            status: self.status.clone(),
            query: self.query.clone(),
            derived: self.derived.clone(),
            job: self.job,
            run_enabled: self.job == JobRunState::Idle,
            last_etl: self.last_etl.clone(),
            dirty: self.dirty,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Last successfully loaded page, if any.
    pub fn page(&self) -> Option<&DataPage> {
        self.page.as_ref()
    }

    pub fn job(&self) -> JobRunState {
        self.job
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_limit(&mut self, limit: i64) {
        self.query.limit = limit;
        self.mark_dirty();
    }

    pub(crate) fn set_offset(&mut self, offset: i64) {
        self.query.offset = offset;
        self.mark_dirty();
    }

    pub(crate) fn set_search_text(&mut self, search_text: String) {
        self.query.search_text = search_text;
        self.reproject();
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.mark_dirty();
    }

    pub(crate) fn set_health(&mut self, health: HealthStatus) {
        self.health = health;
        self.mark_dirty();
    }

    /// Allocates the next request id and snapshots the query it will use.
    pub(crate) fn begin_fetch(&mut self) -> (RequestId, QueryState) {
        self.next_request_id += 1;
        (self.next_request_id, self.query.clone())
    }

    /// A response is stale once a newer request has already resolved.
    pub(crate) fn is_stale(&self, request_id: RequestId) -> bool {
        self.newest_resolved
            .is_some_and(|newest| request_id < newest)
    }

    pub(crate) fn mark_resolved(&mut self, request_id: RequestId) {
        self.newest_resolved = Some(request_id);
    }

    pub(crate) fn apply_page(&mut self, page: DataPage) {
        self.page = Some(page);
        self.reproject();
    }

    pub(crate) fn start_job(&mut self) {
        self.job = JobRunState::Running;
        self.job_refresh = None;
        self.mark_dirty();
    }

    pub(crate) fn record_etl(&mut self, summary: EtlSummary) {
        self.last_etl = Some(summary);
        self.mark_dirty();
    }

    pub(crate) fn attach_job_refresh(&mut self, request_id: RequestId) {
        self.job_refresh = Some(request_id);
    }

    /// Ends the ETL run if `request_id` is its refresh. Returns whether it was.
    pub(crate) fn release_job_on(&mut self, request_id: RequestId) -> bool {
        if self.job_refresh != Some(request_id) {
            return false;
        }
        self.finish_job();
        true
    }

    pub(crate) fn finish_job(&mut self) {
        self.job = JobRunState::Idle;
        self.job_refresh = None;
        self.mark_dirty();
    }

    fn reproject(&mut self) {
        self.derived = match &self.page {
            Some(page) => project(page, &self.query.search_text),
            None => DerivedView::default(),
        };
        self.mark_dirty();
    }
}
