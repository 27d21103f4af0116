use std::sync::Arc;

use dashboard_core::{DataPage, QueryState, Record};
use serde::Deserialize;

use crate::{ApiError, ErrorKind, Request, Transport};

pub const DATA_PATH: &str = "/data";

#[derive(Debug, Deserialize)]
struct DataResponse {
    #[serde(default)]
    items: Option<Vec<Record>>,
    #[serde(default)]
    total: Option<u64>,
}

/// Fetches one page of records.
#[derive(Clone)]
pub struct DataLoader {
    transport: Arc<dyn Transport>,
}

impl DataLoader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `limit` and `offset` are sent exactly as held in `query`; the search
    /// text is never sent.
    pub async fn load(&self, query: &QueryState) -> Result<DataPage, ApiError> {
        let request = Request::get(DATA_PATH)
            .query("limit", query.limit.to_string())
            .query("offset", query.offset.to_string());
        let payload = self.transport.request(&request).await?;

        let response: DataResponse = serde_json::from_value(payload).map_err(|err| {
            ApiError::new(ErrorKind::Parse, format!("unexpected data payload: {err}"))
        })?;

        Ok(DataPage {
            items: response.items.unwrap_or_default(),
            total: response.total,
        })
    }
}
