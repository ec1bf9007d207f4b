use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{EntityId, PageQuery, PaginatedResponse};

/// CRUD access to one REST collection.
///
/// The master–detail engine only ever talks to this trait; the REST
/// implementation is [`RestCollection`](crate::RestCollection) and tests
/// substitute in-memory mocks.
#[async_trait]
pub trait CollectionApi<T: Send>: Send + Sync {
    /// Collection name, e.g. `"clients"`.
    fn collection(&self) -> &str;

    /// `GET /<collection>?page&limit&search`
    async fn fetch_page(&self, query: &PageQuery) -> Result<PaginatedResponse<T>>;

    /// `POST /<collection>` with a payload that omits `id`.
    async fn create(&self, payload: &Value) -> Result<T>;

    /// `PUT /<collection>/{id}` with a payload that omits `id`.
    async fn update(&self, id: EntityId, payload: &Value) -> Result<T>;

    /// `DELETE /<collection>/{id}`
    async fn delete(&self, id: EntityId) -> Result<()>;
}
