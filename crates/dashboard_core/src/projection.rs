use crate::{DataPage, Record};

/// Shown in place of a value that is not known yet.
pub const PLACEHOLDER: &str = "—";

/// What the user sees for a page and a search text.
///
/// Always a pure function of `(DataPage, search_text)`; see [`project`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedView {
    /// Order-preserving subsequence of the page's items.
    pub visible_items: Vec<Record>,
    /// Always `visible_items.len()`.
    pub shown_count: usize,
    pub last_loaded_at: Option<String>,
    pub total_from_server: Option<u64>,
}

impl DerivedView {
    pub fn last_loaded_label(&self) -> &str {
        self.last_loaded_at.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn total_label(&self) -> String {
        self.total_from_server
            .map(|total| total.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// Trims and lower-cases a search text.
pub fn normalize_search(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Applies the client-side filter to a page and derives the aggregates.
///
/// A record is kept when its [`Record::search_haystack`] contains the
/// normalized search text. `last_loaded_at` prefers the first visible record
/// with a timestamp and falls back to the first timestamped record of the
/// whole page, so a filter never blanks a known load time.
pub fn project(page: &DataPage, search_text: &str) -> DerivedView {
    let needle = normalize_search(search_text);
    let visible_items: Vec<Record> = if needle.is_empty() {
        page.items.clone()
    } else {
        page.items
            .iter()
            .filter(|record| record.search_haystack().contains(&needle))
            .cloned()
            .collect()
    };

    let last_loaded_at = first_loaded_at(&visible_items)
        .or_else(|| first_loaded_at(&page.items))
        .map(ToOwned::to_owned);

    DerivedView {
        shown_count: visible_items.len(),
        visible_items,
        last_loaded_at,
        total_from_server: page.total,
    }
}

fn first_loaded_at(items: &[Record]) -> Option<&str> {
    items
        .iter()
        .filter_map(|record| record.loaded_at.as_deref())
        .find(|loaded_at| !loaded_at.is_empty())
}
