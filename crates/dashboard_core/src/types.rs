use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::PLACEHOLDER;

/// Monotonic identifier attached to every data fetch.
pub type RequestId = u64;

/// One row loaded by the backend pipeline.
///
/// Every field is optional: rows from older loads, or from a backend that
/// omits a column, still render (missing cells are empty). A cell of the
/// wrong JSON type reads as missing instead of failing the page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct Record {
    #[serde(rename = "cca2")]
    pub code: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub population: Option<serde_json::Number>,
    pub capital: Option<String>,
    pub loaded_at: Option<String>,
}

/// Row as sent over the wire. Both spellings of the code and timestamp
/// columns are accepted; the snake_case one wins when both are present.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    cca2: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    region: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    population: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "lenient_text")]
    capital: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    loaded_at: Option<String>,
    #[serde(default, rename = "loadedAt", deserialize_with = "lenient_text")]
    loaded_at_camel: Option<String>,
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Self {
            code: wire.cca2.or(wire.code),
            name: wire.name,
            region: wire.region,
            population: wire.population,
            capital: wire.capital,
            loaded_at: wire.loaded_at.or(wire.loaded_at_camel),
        }
    }
}

/// Strings as-is, numbers and booleans as their text, anything else `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Numbers as-is, numeric strings parsed, anything else `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<serde_json::Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => Some(number),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

impl Record {
    /// Lower-cased `code name region capital`, the text the free-text filter
    /// searches.
    pub fn search_haystack(&self) -> String {
        let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();
        format!(
            "{} {} {} {}",
            field(&self.code),
            field(&self.name),
            field(&self.region),
            field(&self.capital)
        )
        .to_lowercase()
    }

    /// Population rendered for display; empty when absent.
    pub fn population_text(&self) -> String {
        self.population
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// One server-fetched page of records plus the server's reported total.
///
/// Pages are replaced wholesale by the next successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataPage {
    pub items: Vec<Record>,
    /// `None` when the server did not report a total.
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Ok,
    Error,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Unknown => "API: ...",
            HealthStatus::Ok => "API: OK",
            HealthStatus::Error => "API: KO",
        }
    }
}

/// State of the single ETL trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobRunState {
    #[default]
    Idle,
    Running,
}

/// Result of a successful ETL run as reported by the backend.
///
/// The counters are optional: a 2xx reply means the run happened even when
/// the body does not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EtlSummary {
    #[serde(default)]
    pub rows_processed: Option<u64>,
    #[serde(default)]
    pub total_rows_in_db: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EtlSummary {
    pub fn status_line(&self) -> String {
        format!(
            "ETL OK: rows_processed={}, total_db={}",
            counter_text(self.rows_processed),
            counter_text(self.total_rows_in_db)
        )
    }
}

fn counter_text(value: Option<u64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |value| value.to_string())
}
