//! Test helpers
//!
//! In-memory collection and row source mocks that record every call.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use maintdesk_client::{
    ApiError, CollectionApi, EntityId, PageQuery, PaginatedResponse, Result as ApiResult,
};

use crate::services::RowSource;
use crate::types::Entity;

// ===== MockCollection =====

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Fetch(PageQuery),
    Create(Value),
    Update(EntityId, Value),
    Delete(EntityId),
}

pub struct MockCollection<E> {
    records: RwLock<Vec<E>>,
    next_id: RwLock<EntityId>,
    calls: RwLock<Vec<MockCall>>,
    /// If Some, the next call returns this error
    fail_next: RwLock<Option<ApiError>>,
}

impl<E: Entity> MockCollection<E> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<E>) -> Self {
        let next_id = records.iter().map(E::id).max().unwrap_or(0) + 1;
        Self {
            records: RwLock::new(records),
            next_id: RwLock::new(next_id),
            calls: RwLock::new(Vec::new()),
            fail_next: RwLock::new(None),
        }
    }

    pub async fn fail_next(&self, err: ApiError) {
        *self.fail_next.write().await = Some(err);
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.calls.read().await.clone()
    }

    pub async fn records(&self) -> Vec<E> {
        self.records.read().await.clone()
    }

    async fn record_call(&self, call: MockCall) -> ApiResult<()> {
        self.calls.write().await.push(call);
        match self.fail_next.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: EntityId) -> ApiError {
        ApiError::NotFound {
            collection: E::COLLECTION.to_string(),
            id: Some(id),
            raw_message: None,
        }
    }

    fn decode(payload: &Value, id: EntityId) -> ApiResult<E> {
        let mut body = payload.clone();
        if let Some(obj) = body.as_object_mut() {
            obj.insert("id".to_string(), Value::from(id));
        }
        serde_json::from_value(body).map_err(|e| ApiError::ParseError {
            collection: E::COLLECTION.to_string(),
            detail: e.to_string(),
        })
    }

    fn matches(record: &E, needle: &str) -> bool {
        needle.is_empty()
            || E::schema().fields().iter().any(|spec| {
                record
                    .field(spec.key)
                    .is_some_and(|v| v.display().to_lowercase().contains(needle))
            })
    }
}

#[async_trait]
impl<E: Entity> CollectionApi<E> for MockCollection<E> {
    fn collection(&self) -> &str {
        E::COLLECTION
    }

    async fn fetch_page(&self, query: &PageQuery) -> ApiResult<PaginatedResponse<E>> {
        self.record_call(MockCall::Fetch(query.clone())).await?;
        let needle = query.search.to_lowercase();
        let records = self.records.read().await;
        let matching: Vec<&E> = records.iter().filter(|r| Self::matches(r, &needle)).collect();
        let limit = query.limit.max(1) as usize;
        let total = matching.len();
        let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX);
        let items = matching
            .into_iter()
            .skip(query.wire_page() as usize * limit)
            .take(limit)
            .cloned()
            .collect();
        Ok(PaginatedResponse::new(
            items,
            query.page,
            total_pages,
            total as u64,
        ))
    }

    async fn create(&self, payload: &Value) -> ApiResult<E> {
        self.record_call(MockCall::Create(payload.clone())).await?;
        let id = {
            let mut next = self.next_id.write().await;
            let id = *next;
            *next += 1;
            id
        };
        let record = Self::decode(payload, id)?;
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: EntityId, payload: &Value) -> ApiResult<E> {
        self.record_call(MockCall::Update(id, payload.clone()))
            .await?;
        let record = Self::decode(payload, id)?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: EntityId) -> ApiResult<()> {
        self.record_call(MockCall::Delete(id)).await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

// ===== StaticRows =====

/// Fixed rows per collection for reference-option loading.
#[derive(Default)]
pub struct StaticRows {
    rows: HashMap<String, Vec<Value>>,
    queries: RwLock<Vec<(String, PageQuery)>>,
}

impl StaticRows {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, collection: &str, rows: Vec<Value>) -> Self {
        self.rows.insert(collection.to_string(), rows);
        self
    }

    pub async fn queries(&self) -> Vec<(String, PageQuery)> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl RowSource for StaticRows {
    async fn fetch_rows(
        &self,
        collection: &str,
        query: &PageQuery,
    ) -> ApiResult<PaginatedResponse<Value>> {
        self.queries
            .write()
            .await
            .push((collection.to_string(), query.clone()));
        let rows = self.rows.get(collection).ok_or_else(|| ApiError::NotFound {
            collection: collection.to_string(),
            id: None,
            raw_message: None,
        })?;
        let total = rows.len() as u64;
        Ok(PaginatedResponse::new(rows.clone(), 1, 1, total))
    }
}
