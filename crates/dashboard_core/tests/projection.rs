use dashboard_core::{normalize_search, project, DataPage, Record, PLACEHOLDER};
use pretty_assertions::assert_eq;

fn record(code: &str, name: &str, region: &str, capital: &str, loaded_at: &str) -> Record {
    let opt = |value: &str| (!value.is_empty()).then(|| value.to_string());
    Record {
        code: opt(code),
        name: opt(name),
        region: opt(region),
        population: None,
        capital: opt(capital),
        loaded_at: opt(loaded_at),
    }
}

fn sample_page() -> DataPage {
    DataPage {
        items: vec![
            record("FR", "France", "Europe", "Paris", "t1"),
            record("DE", "Germany", "Europe", "Berlin", "t2"),
            record("JP", "Japan", "Asia", "Tokyo", ""),
            record("BR", "Brazil", "Americas", "Brasília", "t4"),
            Record::default(),
        ],
        total: Some(250),
    }
}

fn is_ordered_subsequence(sub: &[Record], full: &[Record]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|candidate| candidate == wanted))
}

#[test]
fn search_scenario_from_two_row_page() {
    let page = DataPage {
        items: vec![
            record("FR", "France", "", "", "t1"),
            record("DE", "Germany", "", "", "t2"),
        ],
        total: Some(2),
    };

    let view = project(&page, "ger");

    assert_eq!(view.visible_items, vec![record("DE", "Germany", "", "", "t2")]);
    assert_eq!(view.shown_count, 1);
    assert_eq!(view.last_loaded_at.as_deref(), Some("t2"));
    assert_eq!(view.total_from_server, Some(2));
}

#[test]
fn empty_search_keeps_every_item_in_order() {
    let page = sample_page();
    for search in ["", "   ", "\t\n"] {
        let view = project(&page, search);
        assert_eq!(view.visible_items, page.items);
        assert_eq!(view.shown_count, page.items.len());
    }
}

#[test]
fn visible_items_are_an_ordered_subsequence_with_matching_count() {
    let page = sample_page();
    for search in ["", "e", "europe", "an", "zz", "o", "asia", " PARIS ", "r"] {
        let view = project(&page, search);
        assert!(
            is_ordered_subsequence(&view.visible_items, &page.items),
            "search {search:?} broke ordering"
        );
        assert_eq!(view.shown_count, view.visible_items.len());
    }
}

#[test]
fn search_is_case_insensitive() {
    let page = sample_page();
    assert_eq!(project(&page, "FR").visible_items, project(&page, "fr").visible_items);
    assert_eq!(
        project(&page, "EuRoPe").visible_items,
        project(&page, "europe").visible_items
    );
    assert_eq!(project(&page, "FR").shown_count, 1);
}

#[test]
fn search_spans_code_name_region_and_capital() {
    let page = sample_page();
    assert_eq!(project(&page, "jp").shown_count, 1);
    assert_eq!(project(&page, "japan").shown_count, 1);
    assert_eq!(project(&page, "asia").shown_count, 1);
    assert_eq!(project(&page, "tokyo").shown_count, 1);
    // Fields are space-joined, so a query can straddle two of them.
    assert_eq!(project(&page, "jp japan").shown_count, 1);
    // Timestamps are not searchable.
    assert_eq!(project(&page, "t4").shown_count, 0);
}

#[test]
fn last_loaded_prefers_first_visible_timestamp() {
    let page = sample_page();
    assert_eq!(project(&page, "").last_loaded_at.as_deref(), Some("t1"));
    assert_eq!(project(&page, "brazil").last_loaded_at.as_deref(), Some("t4"));
}

#[test]
fn last_loaded_falls_back_to_page_when_visible_rows_lack_timestamps() {
    let page = sample_page();
    let view = project(&page, "japan");

    assert_eq!(view.shown_count, 1);
    assert_eq!(view.last_loaded_at.as_deref(), Some("t1"));
    assert_eq!(view.last_loaded_label(), "t1");
}

#[test]
fn last_loaded_falls_back_to_page_when_nothing_matches() {
    let view = project(&sample_page(), "atlantis");
    assert_eq!(view.shown_count, 0);
    assert_eq!(view.last_loaded_at.as_deref(), Some("t1"));
}

#[test]
fn placeholders_when_nothing_is_known() {
    let page = DataPage {
        items: vec![record("JP", "Japan", "Asia", "Tokyo", "")],
        total: None,
    };
    let view = project(&page, "");

    assert_eq!(view.last_loaded_at, None);
    assert_eq!(view.last_loaded_label(), PLACEHOLDER);
    assert_eq!(view.total_label(), PLACEHOLDER);
}

#[test]
fn normalize_search_trims_and_lowercases() {
    assert_eq!(normalize_search("  GeR \n"), "ger");
    assert_eq!(normalize_search(""), "");
}
