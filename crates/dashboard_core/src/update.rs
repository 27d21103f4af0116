use dashboard_logging::{dash_debug, dash_info};

use crate::{parse_limit, parse_offset, AppState, DataPage, Effect, JobRunState, Msg, RequestId};

pub const STATUS_LOADING: &str = "Loading data...";
pub const STATUS_OK: &str = "OK";
pub const STATUS_ETL_RUNNING: &str = "ETL running...";
pub const STATUS_ETL_BUSY: &str = "ETL already running, wait for it to finish";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.set_status(STATUS_LOADING);
            vec![Effect::ProbeHealth, fetch(&mut state)]
        }
        Msg::LimitChanged(raw) => {
            state.set_limit(parse_limit(&raw));
            Vec::new()
        }
        Msg::OffsetChanged(raw) => {
            state.set_offset(parse_offset(&raw));
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            // The filter applies to the current page right away; the reload
            // only refreshes the page itself.
            state.set_search_text(text);
            state.set_status(STATUS_LOADING);
            vec![fetch(&mut state)]
        }
        Msg::RefreshRequested => {
            state.set_status(STATUS_LOADING);
            vec![fetch(&mut state)]
        }
        Msg::RunRequested => {
            if state.job() == JobRunState::Running {
                dash_info!("ETL trigger ignored: a run is already in flight");
                state.set_status(STATUS_ETL_BUSY);
                return (state, Vec::new());
            }
            state.start_job();
            state.set_status(STATUS_ETL_RUNNING);
            vec![Effect::RunEtl]
        }
        Msg::HealthCheckRequested => vec![Effect::ProbeHealth],
        Msg::HealthProbed(health) => {
            state.set_health(health);
            Vec::new()
        }
        Msg::DataLoaded { request_id, result } => {
            apply_load(&mut state, request_id, result);
            Vec::new()
        }
        Msg::EtlFinished(Ok(summary)) => {
            dash_info!(
                "ETL finished: rows_processed={:?} total_rows_in_db={:?}",
                summary.rows_processed,
                summary.total_rows_in_db
            );
            state.set_status(summary.status_line());
            state.record_etl(summary);
            if state.job() == JobRunState::Running {
                let effect = fetch(&mut state);
                if let Effect::FetchData { request_id, .. } = &effect {
                    state.attach_job_refresh(*request_id);
                }
                vec![effect]
            } else {
                vec![fetch(&mut state)]
            }
        }
        Msg::EtlFinished(Err(message)) => {
            state.set_status(format!("ETL error: {message}"));
            state.finish_job();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch(state: &mut AppState) -> Effect {
    let (request_id, query) = state.begin_fetch();
    Effect::FetchData { request_id, query }
}

fn apply_load(state: &mut AppState, request_id: RequestId, result: Result<DataPage, String>) {
    // The ETL run ends with its refresh whatever the refresh outcome.
    let was_job_refresh = state.release_job_on(request_id);

    if state.is_stale(request_id) {
        dash_debug!("Discarding stale data response for request {}", request_id);
        return;
    }
    state.mark_resolved(request_id);

    match result {
        Ok(page) => {
            dash_debug!(
                "Applying data page for request {}: {} items, total {:?}",
                request_id,
                page.items.len(),
                page.total
            );
            state.apply_page(page);
            if !was_job_refresh {
                state.set_status(STATUS_OK);
            }
        }
        Err(message) => {
            state.set_status(format!("Error: {message}"));
        }
    }
}
