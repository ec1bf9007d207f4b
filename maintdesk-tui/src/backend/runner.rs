//! Effect execution off the UI thread

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use maintdesk_core::CoreError;
use maintdesk_core::editor::{Effect, PageMsg, failed};
use maintdesk_core::services::EntityService;
use maintdesk_core::types::Entity;

/// Runs one tab's effects and queues the completions.
///
/// Each batch runs concurrently through [`EntityService::execute_all`]; if the
/// task dies, every effect in the batch completes with [`CoreError::TaskFailed`]
/// so the page never waits forever on a pending form or dialog.
pub struct EffectRunner<E: Entity> {
    service: EntityService<E>,
    runtime: Handle,
    tx: UnboundedSender<PageMsg<E>>,
    rx: UnboundedReceiver<PageMsg<E>>,
    in_flight: usize,
}

impl<E: Entity> EffectRunner<E> {
    pub fn new(service: EntityService<E>, runtime: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            service,
            runtime,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn spawn(&mut self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        self.in_flight += effects.len();

        let service = self.service.clone();
        let batch = effects.clone();
        let task = self
            .runtime
            .spawn(async move { service.execute_all(effects).await });

        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let completions = match task.await {
                Ok(done) => done,
                Err(e) => {
                    log::error!("{}: effect task failed: {e}", E::COLLECTION);
                    let reason = e.to_string();
                    batch
                        .iter()
                        .map(|effect| failed(effect, CoreError::TaskFailed(reason.clone())))
                        .collect()
                }
            };
            for msg in completions {
                // Receiver gone: the tab was dropped on exit
                if tx.send(msg).is_err() {
                    break;
                }
            }
        });
    }

    /// Completions that arrived since the last call, oldest first.
    pub fn drain(&mut self) -> Vec<PageMsg<E>> {
        let mut done = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            done.push(msg);
        }
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use maintdesk_client::{CollectionApi, EntityId, PageQuery, PaginatedResponse};
    use maintdesk_core::services::{ReferenceOptionsService, RowSource};
    use maintdesk_core::types::Client;
    use serde_json::Value;

    use super::*;

    /// Collection answering every list with the same records.
    pub(crate) struct FixedCollection(pub Vec<Client>);

    #[async_trait::async_trait]
    impl CollectionApi<Client> for FixedCollection {
        fn collection(&self) -> &str {
            "clients"
        }

        async fn fetch_page(
            &self,
            query: &PageQuery,
        ) -> maintdesk_client::Result<PaginatedResponse<Client>> {
            let total = self.0.len() as u64;
            Ok(PaginatedResponse::new(self.0.clone(), query.page, 1, total))
        }

        async fn create(&self, payload: &Value) -> maintdesk_client::Result<Client> {
            let mut body = payload.clone();
            body["id"] = Value::from(99);
            serde_json::from_value(body).map_err(|e| maintdesk_client::ApiError::ParseError {
                collection: "clients".into(),
                detail: e.to_string(),
            })
        }

        async fn update(
            &self,
            id: EntityId,
            _payload: &Value,
        ) -> maintdesk_client::Result<Client> {
            Err(maintdesk_client::ApiError::NotFound {
                collection: "clients".into(),
                id: Some(id),
                raw_message: None,
            })
        }

        async fn delete(&self, _id: EntityId) -> maintdesk_client::Result<()> {
            Ok(())
        }
    }

    pub(crate) struct NoRows;

    #[async_trait::async_trait]
    impl RowSource for NoRows {
        async fn fetch_rows(
            &self,
            _collection: &str,
            query: &PageQuery,
        ) -> maintdesk_client::Result<PaginatedResponse<Value>> {
            Ok(PaginatedResponse::new(Vec::new(), query.page, 0, 0))
        }
    }

    pub(crate) fn client_service(records: Vec<Client>) -> EntityService<Client> {
        EntityService::new(
            Arc::new(FixedCollection(records)),
            ReferenceOptionsService::new(Arc::new(NoRows)),
        )
    }

    pub(crate) fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    /// Poll `drain` until `want` completions arrived or a second passes.
    fn drain_until<E: Entity>(runner: &mut EffectRunner<E>, want: usize) -> Vec<PageMsg<E>> {
        let mut done = Vec::new();
        for _ in 0..100 {
            done.extend(runner.drain());
            if done.len() >= want {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        done
    }

    #[test]
    fn completions_come_back_through_the_channel() {
        let rt = runtime();
        let mut runner = EffectRunner::new(client_service(Vec::new()), rt.handle().clone());
        assert!(!runner.is_busy());

        runner.spawn(vec![
            Effect::Fetch {
                request_id: 1,
                query: PageQuery::default(),
            },
            Effect::Delete { id: 4 },
        ]);
        assert!(runner.is_busy());

        let done = drain_until(&mut runner, 2);
        assert_eq!(done.len(), 2);
        assert!(matches!(done[0], PageMsg::Fetched { request_id: 1, .. }));
        assert!(matches!(done[1], PageMsg::Deleted { id: 4, result: Ok(()) }));
        assert!(!runner.is_busy());
    }

    #[test]
    fn empty_batches_are_ignored() {
        let rt = runtime();
        let mut runner = EffectRunner::new(client_service(Vec::new()), rt.handle().clone());
        runner.spawn(Vec::new());
        assert!(!runner.is_busy());
        assert!(runner.drain().is_empty());
    }
}
