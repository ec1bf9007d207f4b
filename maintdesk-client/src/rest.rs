//! REST implementation of [`CollectionApi`]

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::session::{AuthInterceptor, SessionContext};
use crate::traits::CollectionApi;
use crate::types::{EntityId, ListEnvelope, PageQuery, PaginatedResponse};

/// Connection settings for [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// API root, e.g. `https://maint.example.com/api/`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries for list fetches. Mutations are never retried.
    pub max_retries: u32,
}

impl RestClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidConfig {
            detail: format!("invalid base URL '{base_url}': {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig {
                detail: format!("base URL '{base_url}' cannot carry a path"),
            });
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(30),
            max_retries: 2,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Shared HTTP client: one connection pool, one session, many collections.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthInterceptor,
    max_retries: u32,
}

impl RestClient {
    pub fn new(config: RestClientConfig, session: Arc<dyn SessionContext>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig {
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url,
            auth: AuthInterceptor::new(session),
            max_retries: config.max_retries,
        })
    }

    /// Typed handle on one collection.
    pub fn collection<T>(&self, name: impl Into<String>) -> RestCollection<T> {
        RestCollection {
            client: self.clone(),
            collection: name.into(),
            _record: PhantomData,
        }
    }

    /// Whether the session currently holds a credential.
    pub fn is_authenticated(&self) -> bool {
        self.auth.session().is_authenticated()
    }

    /// `<base>/<collection>[/<id>]`
    pub(crate) fn endpoint(&self, collection: &str, id: Option<EntityId>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| ApiError::InvalidConfig {
                detail: format!("base URL '{}' cannot carry a path", self.base_url),
            })?;
            segments.pop_if_empty().push(collection);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    /// Fetch a page as untyped JSON rows (used to build dropdown options for
    /// reference fields without knowing the referenced entity type).
    pub async fn fetch_rows(
        &self,
        collection: &str,
        query: &PageQuery,
    ) -> Result<PaginatedResponse<Value>> {
        self.collection::<Value>(collection).fetch_page(query).await
    }
}

/// One REST collection, decoding records as `T`.
pub struct RestCollection<T> {
    client: RestClient,
    collection: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RestCollection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection: self.collection.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> RestCollection<T> {
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        method: &str,
        url: &Url,
        id: Option<EntityId>,
        max_retries: u32,
    ) -> Result<(u16, String)> {
        let builder = self.client.auth.authorize(builder, &self.collection)?;
        let (status, body) = HttpUtils::execute_request_with_retry(
            builder,
            &self.collection,
            method,
            url.as_str(),
            max_retries,
        )
        .await?;
        let body = HttpUtils::check_status(status, body, &self.collection, id)?;
        Ok((status, body))
    }
}

#[async_trait]
impl<T> CollectionApi<T> for RestCollection<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<PaginatedResponse<T>> {
        let url = self.client.endpoint(&self.collection, None)?;
        let builder = self.client.http.get(url.clone()).query(&query.query_pairs());
        let (_, body) = self
            .send(builder, "GET", &url, None, self.client.max_retries)
            .await?;
        let envelope: ListEnvelope<T> = HttpUtils::parse_json(&body, &self.collection)?;
        Ok(envelope.into_response())
    }

    async fn create(&self, payload: &Value) -> Result<T> {
        let url = self.client.endpoint(&self.collection, None)?;
        let builder = self.client.http.post(url.clone()).json(payload);
        let (status, body) = self.send(builder, "POST", &url, None, 0).await?;
        HttpUtils::parse_record(status, &body, &self.collection)
    }

    async fn update(&self, id: EntityId, payload: &Value) -> Result<T> {
        let url = self.client.endpoint(&self.collection, Some(id))?;
        let builder = self.client.http.put(url.clone()).json(payload);
        let (status, body) = self.send(builder, "PUT", &url, Some(id), 0).await?;
        HttpUtils::parse_record(status, &body, &self.collection)
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let url = self.client.endpoint(&self.collection, Some(id))?;
        let builder = self.client.http.delete(url.clone());
        self.send(builder, "DELETE", &url, Some(id), 0).await?;
        Ok(())
    }
}
