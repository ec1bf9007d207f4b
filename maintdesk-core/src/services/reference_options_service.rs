//! Dropdown options for select and multi-select fields

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use maintdesk_client::{PageQuery, PaginatedResponse, RestClient};

use super::log_failure;
use crate::error::{CoreError, CoreResult};
use crate::types::{RefSource, Reference};

/// Options are taken from the first page of this size.
pub const OPTIONS_LIMIT: u32 = 100;

/// Untyped row listing (the REST client, or a stub in tests).
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(
        &self,
        collection: &str,
        query: &PageQuery,
    ) -> maintdesk_client::Result<PaginatedResponse<Value>>;
}

#[async_trait]
impl RowSource for RestClient {
    async fn fetch_rows(
        &self,
        collection: &str,
        query: &PageQuery,
    ) -> maintdesk_client::Result<PaginatedResponse<Value>> {
        RestClient::fetch_rows(self, collection, query).await
    }
}

/// `{id, <label_field>}` → reference pair. Rows without a numeric id are skipped.
pub fn row_to_reference(row: &Value, label_field: &str) -> Option<Reference> {
    let id = row.get("id")?.as_u64()?;
    let label = match row.get(label_field) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(Value::Object(obj)) => obj
            .get("label")
            .or_else(|| obj.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(other) => other.to_string(),
    };
    Some(Reference::new(id, label))
}

/// Reference options service (stateless)
#[derive(Clone)]
pub struct ReferenceOptionsService {
    rows: Arc<dyn RowSource>,
}

impl ReferenceOptionsService {
    pub fn new(rows: Arc<dyn RowSource>) -> Self {
        Self { rows }
    }

    /// Options for one reference source.
    pub async fn load(&self, source: RefSource) -> CoreResult<Vec<Reference>> {
        let query = PageQuery::new(1, OPTIONS_LIMIT, "");
        let page = self
            .rows
            .fetch_rows(source.collection, &query)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("Loading {} options", source.collection), e))?;
        if page.total_records > u64::from(OPTIONS_LIMIT) {
            log::debug!(
                "{}: showing first {OPTIONS_LIMIT} of {} options",
                source.collection,
                page.total_records
            );
        }
        Ok(page
            .items
            .iter()
            .filter_map(|row| row_to_reference(row, source.label_field))
            .collect())
    }
}
