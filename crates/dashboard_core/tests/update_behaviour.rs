use std::sync::Once;

use dashboard_core::{
    update, AppState, DataPage, Effect, HealthStatus, Msg, Record, RequestId, STATUS_LOADING,
    STATUS_OK,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn page(codes: &[&str], total: Option<u64>) -> DataPage {
    DataPage {
        items: codes
            .iter()
            .map(|code| Record {
                code: Some(code.to_string()),
                loaded_at: Some(format!("loaded-{code}")),
                ..Record::default()
            })
            .collect(),
        total,
    }
}

fn fetch_ids(effects: &[Effect]) -> Vec<RequestId> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchData { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .collect()
}

fn loaded(state: AppState, request_id: RequestId, result: Result<DataPage, String>) -> AppState {
    let (state, effects) = update(state, Msg::DataLoaded { request_id, result });
    assert!(effects.is_empty());
    state
}

#[test]
fn started_probes_health_and_loads_first_page() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::ProbeHealth);
    assert_eq!(fetch_ids(&effects), vec![1]);
    assert_eq!(state.view().status, STATUS_LOADING);
    assert!(state.consume_dirty());
}

#[test]
fn successful_load_replaces_page_and_reports_ok() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    let id = fetch_ids(&effects)[0];

    let mut state = loaded(state, id, Ok(page(&["FR", "DE"], Some(120))));
    let view = state.view();

    assert_eq!(view.status, STATUS_OK);
    assert_eq!(view.derived.shown_count, 2);
    assert_eq!(view.derived.total_from_server, Some(120));
    assert_eq!(view.derived.last_loaded_at.as_deref(), Some("loaded-FR"));
    assert!(state.consume_dirty());
}

#[test]
fn total_shows_placeholder_until_first_load() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.derived.total_label(), "—");
    assert_eq!(view.derived.last_loaded_label(), "—");
    assert_eq!(view.derived.shown_count, 0);
}

#[test]
fn failed_load_keeps_previous_page_and_health() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    let state = loaded(state, fetch_ids(&effects)[0], Ok(page(&["FR"], Some(1))));
    let (state, _) = update(state, Msg::HealthProbed(HealthStatus::Ok));

    let (state, effects) = update(state, Msg::RefreshRequested);
    let state = loaded(state, fetch_ids(&effects)[0], Err("db down".to_string()));
    let view = state.view();

    assert_eq!(view.status, "Error: db down");
    assert_eq!(view.derived.shown_count, 1);
    assert_eq!(view.derived.total_from_server, Some(1));
    assert_eq!(view.health, HealthStatus::Ok);
}

#[test]
fn health_changes_only_through_probes() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.view().health, HealthStatus::Unknown);
    assert_eq!(state.view().health_label, "API: ...");

    let (state, effects) = update(state, Msg::HealthCheckRequested);
    assert_eq!(effects, vec![Effect::ProbeHealth]);
    assert_eq!(state.view().health, HealthStatus::Unknown);

    let (state, _) = update(state, Msg::HealthProbed(HealthStatus::Error));
    assert_eq!(state.view().health_label, "API: KO");
    let (state, _) = update(state, Msg::HealthProbed(HealthStatus::Ok));
    assert_eq!(state.view().health_label, "API: OK");
}

#[test]
fn search_filters_current_page_immediately_and_reloads() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    let state = loaded(state, fetch_ids(&effects)[0], Ok(page(&["FR", "DE"], Some(2))));

    let (state, effects) = update(state, Msg::SearchChanged("de".to_string()));
    let view = state.view();

    assert_eq!(view.derived.shown_count, 1);
    assert_eq!(view.derived.total_from_server, Some(2));
    assert_eq!(fetch_ids(&effects), vec![2]);
    match &effects[0] {
        Effect::FetchData { query, .. } => assert_eq!(query.search_text, "de"),
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn stale_response_does_not_overwrite_newer_page() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::RefreshRequested);
    let (state, second) = update(state, Msg::RefreshRequested);
    let (first, second) = (fetch_ids(&first)[0], fetch_ids(&second)[0]);
    assert!(first < second);

    let state = loaded(state, second, Ok(page(&["NEW"], Some(1))));
    let state = loaded(state, first, Ok(page(&["OLD1", "OLD2"], Some(2))));
    let view = state.view();

    assert_eq!(view.derived.visible_items[0].code.as_deref(), Some("NEW"));
    assert_eq!(view.derived.total_from_server, Some(1));
}

#[test]
fn stale_error_does_not_overwrite_status() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::RefreshRequested);
    let (state, second) = update(state, Msg::RefreshRequested);

    let state = loaded(state, fetch_ids(&second)[0], Ok(page(&["FR"], Some(1))));
    let state = loaded(state, fetch_ids(&first)[0], Err("timeout".to_string()));

    assert_eq!(state.view().status, STATUS_OK);
}

#[test]
fn responses_in_issue_order_are_all_applied() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::RefreshRequested);
    let (state, second) = update(state, Msg::RefreshRequested);

    let state = loaded(state, fetch_ids(&first)[0], Ok(page(&["A"], Some(1))));
    assert_eq!(state.view().derived.visible_items[0].code.as_deref(), Some("A"));
    let state = loaded(state, fetch_ids(&second)[0], Ok(page(&["B"], Some(1))));
    assert_eq!(state.view().derived.visible_items[0].code.as_deref(), Some("B"));
}
