//! Pagination window and free-text filter, plus the permissive parsing of
//! the numeric inputs.

pub const DEFAULT_LIMIT: i64 = 50;
pub const DEFAULT_OFFSET: i64 = 0;

/// User-editable query parameters.
///
/// `limit` and `offset` are sent to the server verbatim; negative values are
/// not rejected here. `search_text` never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub limit: i64,
    pub offset: i64,
    pub search_text: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            search_text: String::new(),
        }
    }
}

/// Parses the limit input. Blank or non-numeric input yields [`DEFAULT_LIMIT`].
pub fn parse_limit(raw: &str) -> i64 {
    parse_or(raw, DEFAULT_LIMIT)
}

/// Parses the offset input. Blank or non-numeric input yields [`DEFAULT_OFFSET`].
pub fn parse_offset(raw: &str) -> i64 {
    parse_or(raw, DEFAULT_OFFSET)
}

fn parse_or(raw: &str, default: i64) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    // Integral spellings such as "20.0" or "1e2" are accepted.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
        .map(|value| value as i64)
        .unwrap_or(default)
}
