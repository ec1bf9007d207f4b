//! CRUD service for one entity type

use std::sync::Arc;

use serde_json::Value;

use maintdesk_client::{CollectionApi, EntityId, PageQuery, PaginatedResponse};

use super::log_failure;
use super::reference_options_service::ReferenceOptionsService;
use crate::editor::{Effect, PageMsg};
use crate::error::{CoreError, CoreResult};
use crate::types::Entity;

/// Entity service: executes page effects and turns results into messages.
pub struct EntityService<E: Entity> {
    api: Arc<dyn CollectionApi<E>>,
    options: ReferenceOptionsService,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            options: self.options.clone(),
        }
    }
}

impl<E: Entity> EntityService<E> {
    #[must_use]
    pub fn new(api: Arc<dyn CollectionApi<E>>, options: ReferenceOptionsService) -> Self {
        Self { api, options }
    }

    /// List one page (search + pagination)
    pub async fn list(&self, query: &PageQuery) -> CoreResult<PaginatedResponse<E>> {
        self.api
            .fetch_page(query)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("Listing {}", E::COLLECTION), e))
    }

    pub async fn create(&self, payload: &Value) -> CoreResult<E> {
        let record = self
            .api
            .create(payload)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("Creating {}", E::COLLECTION), e))?;
        log::info!("{}: created #{}", E::COLLECTION, record.id());
        Ok(record)
    }

    pub async fn update(&self, id: EntityId, payload: &Value) -> CoreResult<E> {
        let record = self
            .api
            .update(id, payload)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("Updating {} #{id}", E::COLLECTION), e))?;
        log::info!("{}: updated #{id}", E::COLLECTION);
        Ok(record)
    }

    pub async fn delete(&self, id: EntityId) -> CoreResult<()> {
        self.api
            .delete(id)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("Deleting {} #{id}", E::COLLECTION), e))?;
        log::info!("{}: deleted #{id}", E::COLLECTION);
        Ok(())
    }

    /// Run one effect and return its completion message.
    pub async fn execute(&self, effect: Effect) -> PageMsg<E> {
        match effect {
            Effect::Fetch { request_id, query } => {
                let result = self.list(&query).await;
                PageMsg::Fetched {
                    request_id,
                    query,
                    result,
                }
            }
            Effect::Create { payload } => PageMsg::Created(self.create(&payload).await),
            Effect::Update { id, payload } => PageMsg::Updated(self.update(id, &payload).await),
            Effect::Delete { id } => PageMsg::Deleted {
                id,
                result: self.delete(id).await,
            },
            Effect::LoadOptions { field, source } => PageMsg::OptionsLoaded {
                field,
                result: self.options.load(source).await,
            },
        }
    }

    /// Run effects concurrently; completions keep the effects' order.
    pub async fn execute_all(&self, effects: Vec<Effect>) -> Vec<PageMsg<E>> {
        futures::future::join_all(effects.into_iter().map(|effect| self.execute(effect))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockCall, MockCollection, StaticRows};
    use crate::types::{Client, Product, VENDORS};
    use maintdesk_client::ApiError;
    use serde_json::json;

    fn service<E: Entity>(mock: &Arc<MockCollection<E>>) -> EntityService<E> {
        let rows = StaticRows::new().with(
            "vendors",
            vec![json!({ "id": 1, "vendorName": "Bolt Works" })],
        );
        EntityService::new(
            mock.clone(),
            ReferenceOptionsService::new(Arc::new(rows)),
        )
    }

    #[tokio::test]
    async fn create_assigns_an_id() {
        let mock = Arc::new(MockCollection::<Client>::new());
        let svc = service(&mock);
        let created = svc
            .create(&json!({ "clientName": "Acme", "contactNumber": "9999999999" }))
            .await;
        assert!(matches!(created, Ok(ref c) if c.id > 0 && c.client_name == "Acme"));
        assert_eq!(mock.records().await.len(), 1);
    }

    #[tokio::test]
    async fn api_errors_become_core_errors() {
        let mock = Arc::new(MockCollection::<Client>::new());
        mock.fail_next(ApiError::NetworkError {
            collection: "clients".into(),
            detail: "connection reset".into(),
        })
        .await;
        let svc = service(&mock);
        let result = svc.delete(1).await;
        assert!(matches!(
            result,
            Err(CoreError::Api(ApiError::NetworkError { .. }))
        ));
    }

    #[tokio::test]
    async fn execute_maps_effects_to_completions() {
        let mock = Arc::new(MockCollection::<Product>::new());
        let svc = service(&mock);
        let msgs = svc
            .execute_all(vec![
                Effect::LoadOptions {
                    field: "vendor",
                    source: VENDORS,
                },
                Effect::Fetch {
                    request_id: 7,
                    query: PageQuery::default(),
                },
                Effect::Delete { id: 99 },
            ])
            .await;
        assert!(matches!(
            &msgs[0],
            PageMsg::OptionsLoaded { field: "vendor", result: Ok(opts) } if opts.len() == 1
        ));
        assert!(matches!(
            &msgs[1],
            PageMsg::Fetched { request_id: 7, result: Ok(page), .. } if page.items.is_empty()
        ));
        assert!(matches!(
            &msgs[2],
            PageMsg::Deleted { id: 99, result: Err(CoreError::Api(ApiError::NotFound { .. })) }
        ));
        let calls = mock.calls().await;
        assert_eq!(calls[0], MockCall::Fetch(PageQuery::default()));
    }
}
