//! Service layer: runs page effects against the REST backend

mod entity_service;
mod reference_options_service;

pub use entity_service::EntityService;
pub use reference_options_service::{
    OPTIONS_LIMIT, ReferenceOptionsService, RowSource, row_to_reference,
};

use std::sync::Arc;

use maintdesk_client::{CollectionApi, RestClient, SessionContext};

use crate::config::ConsoleConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::Entity;

/// Service context - holds all dependencies
///
/// The front end creates this once and hands out per-entity services.
pub struct ServiceContext {
    /// Source of the bearer credential
    pub session: Arc<dyn SessionContext>,
    /// Shared HTTP client
    pub client: RestClient,
    pub config: ConsoleConfig,
}

impl ServiceContext {
    pub fn new(config: ConsoleConfig, session: Arc<dyn SessionContext>) -> CoreResult<Self> {
        config.validate()?;
        let client = RestClient::new(config.rest_config()?, Arc::clone(&session))?;
        Ok(Self {
            session,
            client,
            config,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// REST collection for `E`.
    pub fn collection<E: Entity>(&self) -> Arc<dyn CollectionApi<E>> {
        Arc::new(self.client.collection::<E>(E::COLLECTION))
    }

    pub fn reference_options(&self) -> ReferenceOptionsService {
        ReferenceOptionsService::new(Arc::new(self.client.clone()))
    }

    pub fn entity_service<E: Entity>(&self) -> EntityService<E> {
        EntityService::new(self.collection::<E>(), self.reference_options())
    }
}

/// Log at `warn` for expected failures, `error` otherwise.
pub(crate) fn log_failure(context: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
}
