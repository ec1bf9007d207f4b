//! Generic master–detail page: list + form + dialog + pagination
//!
//! The page is a pure state machine. [`MasterDetailPage::update`] consumes a
//! [`PageMsg`] and returns the [`Effect`]s the runtime must perform; their
//! completions come back as `PageMsg` values.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use maintdesk_client::{EntityId, PageQuery, PaginatedResponse};

use super::cache::{ListCache, RequestId};
use super::controls::{FieldControl, field_controls};
use super::delete::DeleteDialog;
use super::form::FieldPatch;
use super::list::{ListView, RowView};
use super::mode::{FormActions, FormMode, ModeController, Submission};
use super::notify::{DEFAULT_TTL, Notifier};
use super::pagination::{PageLink, PaginationState};
use super::search::{DEFAULT_DEBOUNCE, SearchDebouncer};
use crate::config::ConsoleConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{Entity, FieldValue, RefSource, Reference};

/// Per-page tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub items_per_page: u32,
    pub search_debounce: Duration,
    pub notification_ttl: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            items_per_page: 10,
            search_debounce: DEFAULT_DEBOUNCE,
            notification_ttl: DEFAULT_TTL,
        }
    }
}

impl From<&ConsoleConfig> for PageSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            items_per_page: config.items_per_page,
            search_debounce: config.search_debounce(),
            notification_ttl: config.notification_ttl(),
        }
    }
}

/// Work the runtime performs on behalf of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch {
        request_id: RequestId,
        query: PageQuery,
    },
    Create {
        payload: Value,
    },
    Update {
        id: EntityId,
        payload: Value,
    },
    Delete {
        id: EntityId,
    },
    LoadOptions {
        field: &'static str,
        source: RefSource,
    },
}

/// User intents and effect completions.
#[derive(Debug)]
pub enum PageMsg<E> {
    Mount,
    /// Invalidate the cache and refetch.
    Refresh,
    RowClicked(EntityId),
    EditRequested(EntityId),
    DeleteRequested(EntityId),
    NewRecord,
    FieldChanged {
        key: String,
        value: FieldValue,
    },
    Patch(FieldPatch),
    Discard,
    Submit,
    ConfirmDelete,
    CancelDelete,
    PageChanged(u32),
    ItemsPerPageChanged(u32),
    SearchTyped {
        term: String,
        at: Instant,
    },
    SearchSubmitted,
    Tick(Instant),
    DismissNotification(u64),

    // ===== Completions =====
    Fetched {
        request_id: RequestId,
        query: PageQuery,
        result: CoreResult<PaginatedResponse<E>>,
    },
    Created(CoreResult<E>),
    Updated(CoreResult<E>),
    Deleted {
        id: EntityId,
        result: CoreResult<()>,
    },
    OptionsLoaded {
        field: &'static str,
        result: CoreResult<Vec<Reference>>,
    },
}

/// One entity page.
#[derive(Debug)]
pub struct MasterDetailPage<E: Entity> {
    controller: ModeController<E>,
    list: ListView<E>,
    pagination: PaginationState,
    search: SearchDebouncer,
    dialog: DeleteDialog,
    notifier: Notifier,
    cache: ListCache<E>,
    options: HashMap<&'static str, Vec<Reference>>,
    /// Last instant seen on `Tick` or `SearchTyped`; stamps notifications.
    now: Instant,
}

impl<E: Entity> Default for MasterDetailPage<E> {
    fn default() -> Self {
        Self::new(PageSettings::default())
    }
}

impl<E: Entity> MasterDetailPage<E> {
    pub fn new(settings: PageSettings) -> Self {
        Self {
            controller: ModeController::new(),
            list: ListView::new(),
            pagination: PaginationState::new(settings.items_per_page),
            search: SearchDebouncer::new(settings.search_debounce),
            dialog: DeleteDialog::default(),
            notifier: Notifier::new(settings.notification_ttl),
            cache: ListCache::new(),
            options: HashMap::new(),
            now: Instant::now(),
        }
    }

    pub fn title(&self) -> &'static str {
        E::TITLE
    }

    // ========== Read access ==========

    pub fn controller(&self) -> &ModeController<E> {
        &self.controller
    }

    pub fn mode(&self) -> FormMode {
        self.controller.mode()
    }

    pub fn list(&self) -> &ListView<E> {
        &self.list
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.list.rows(&self.controller)
    }

    pub fn controls(&self) -> Vec<FieldControl<'static>> {
        field_controls(&self.controller)
    }

    pub fn actions(&self) -> FormActions {
        self.controller.actions()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        self.pagination.window()
    }

    pub fn search(&self) -> &SearchDebouncer {
        &self.search
    }

    pub fn dialog(&self) -> &DeleteDialog {
        &self.dialog
    }

    pub fn notifications(&self) -> &Notifier {
        &self.notifier
    }

    /// Dropdown options for a reference field.
    pub fn options(&self, field: &str) -> &[Reference] {
        self.options
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // ========== Cursor ==========

    pub fn cursor_up(&mut self) {
        self.list.cursor_up();
    }

    pub fn cursor_down(&mut self) {
        self.list.cursor_down();
    }

    pub fn focused_id(&self) -> Option<EntityId> {
        self.list.focused().map(E::id)
    }

    // ========== Update ==========

    pub fn update(&mut self, msg: PageMsg<E>) -> Vec<Effect> {
        match msg {
            PageMsg::Mount => {
                let mut effects = self.load_options();
                effects.extend(self.fetch_current());
                effects
            }
            PageMsg::Refresh => {
                self.cache.invalidate();
                let mut effects = self.load_options();
                effects.extend(self.fetch_current());
                effects
            }
            PageMsg::RowClicked(id) => {
                if let Some(record) = self.record(id) {
                    self.list.focus(id);
                    self.controller.select(&record);
                }
                Vec::new()
            }
            PageMsg::EditRequested(id) => {
                if let Some(record) = self.record(id) {
                    self.list.focus(id);
                    self.controller.edit(&record);
                }
                Vec::new()
            }
            PageMsg::DeleteRequested(id) => {
                if let Some(record) = self.record(id) {
                    self.dialog.open(id, record.label());
                }
                Vec::new()
            }
            PageMsg::NewRecord => {
                self.controller.reset();
                Vec::new()
            }
            PageMsg::FieldChanged { key, value } => {
                let result = self.controller.set_field(&key, value);
                self.report(result);
                Vec::new()
            }
            PageMsg::Patch(patch) => {
                let result = self.controller.apply(&patch);
                self.report(result);
                Vec::new()
            }
            PageMsg::Discard => {
                self.controller.discard();
                Vec::new()
            }
            PageMsg::Submit => self.submit(),
            PageMsg::ConfirmDelete => self
                .dialog
                .confirm()
                .map(|id| vec![Effect::Delete { id }])
                .unwrap_or_default(),
            PageMsg::CancelDelete => {
                self.dialog.cancel();
                Vec::new()
            }
            PageMsg::PageChanged(page) => {
                if self.pagination.go_to(page) {
                    self.fetch_current()
                } else {
                    Vec::new()
                }
            }
            PageMsg::ItemsPerPageChanged(n) => {
                let unchanged = n == self.pagination.items_per_page()
                    && self.pagination.current_page() == 1;
                self.pagination.set_items_per_page(n);
                if unchanged {
                    Vec::new()
                } else {
                    self.fetch_current()
                }
            }
            PageMsg::SearchTyped { term, at } => {
                self.advance(at);
                self.search.input(term, at);
                Vec::new()
            }
            PageMsg::SearchSubmitted => match self.search.flush() {
                Some(term) => self.apply_search(term),
                None => Vec::new(),
            },
            PageMsg::Tick(now) => {
                self.advance(now);
                self.notifier.expire(now);
                match self.search.poll(now) {
                    Some(term) => self.apply_search(term),
                    None => Vec::new(),
                }
            }
            PageMsg::DismissNotification(id) => {
                self.notifier.dismiss(id);
                Vec::new()
            }
            PageMsg::Fetched {
                request_id,
                query,
                result,
            } => self.on_fetched(request_id, &query, result),
            PageMsg::Created(result) => self.on_saved(result, "Created"),
            PageMsg::Updated(result) => self.on_saved(result, "Saved"),
            PageMsg::Deleted { id, result } => self.on_deleted(id, result),
            PageMsg::OptionsLoaded { field, result } => {
                match result {
                    Ok(options) => {
                        self.options.insert(field, options);
                    }
                    Err(e) => {
                        self.notifier.error(
                            format!("Could not load options: {}", e.user_message()),
                            self.now,
                        );
                    }
                }
                Vec::new()
            }
        }
    }

    fn advance(&mut self, now: Instant) {
        self.now = self.now.max(now);
    }

    fn record(&self, id: EntityId) -> Option<E> {
        self.list.find(id).cloned()
    }

    fn report(&mut self, result: CoreResult<()>) {
        if let Err(e) = result {
            log::debug!("{}: edit rejected: {e}", E::COLLECTION);
            self.notifier.error(e.user_message(), self.now);
        }
    }

    fn load_options(&self) -> Vec<Effect> {
        E::schema()
            .reference_fields()
            .filter_map(|spec| {
                spec.kind.reference_source().map(|source| Effect::LoadOptions {
                    field: spec.key,
                    source,
                })
            })
            .collect()
    }

    fn apply_search(&mut self, term: String) -> Vec<Effect> {
        log::debug!("{}: search '{term}'", E::COLLECTION);
        self.pagination.set_search(term);
        self.fetch_current()
    }

    /// Show the current key from cache, or fetch it.
    fn fetch_current(&mut self) -> Vec<Effect> {
        let query = self.pagination.query();
        if let Some(page) = self.cache.fresh(&query).cloned() {
            return self.show(page);
        }
        self.list.set_loading();
        let request_id = self.cache.issue(&query);
        log::debug!(
            "{}: fetch #{request_id} page={} limit={} search='{}'",
            E::COLLECTION,
            query.page,
            query.limit,
            query.search
        );
        vec![Effect::Fetch { request_id, query }]
    }

    fn show(&mut self, page: PaginatedResponse<E>) -> Vec<Effect> {
        if self
            .pagination
            .apply_totals(page.total_pages, page.total_records)
        {
            return self.fetch_current();
        }
        self.list.set_page(page.items, page.total_records);
        Vec::new()
    }

    fn on_fetched(
        &mut self,
        request_id: RequestId,
        query: &PageQuery,
        result: CoreResult<PaginatedResponse<E>>,
    ) -> Vec<Effect> {
        let current = self.pagination.query() == *query;
        match result {
            Ok(page) => {
                let shown = current.then(|| page.clone());
                if !self.cache.accept(request_id, query, page) {
                    return Vec::new();
                }
                shown.map(|page| self.show(page)).unwrap_or_default()
            }
            Err(e) => {
                if !self.cache.reject(request_id, query) || !current {
                    return Vec::new();
                }
                let message = e.user_message();
                self.list.set_error(message.clone());
                self.notifier.error(message, self.now);
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        match self.controller.begin_submit() {
            Ok(Some(Submission::Create { payload })) => vec![Effect::Create { payload }],
            Ok(Some(Submission::Update { id, payload })) => vec![Effect::Update { id, payload }],
            Ok(None) => Vec::new(),
            Err(e) => {
                self.notifier.error(e.user_message(), self.now);
                Vec::new()
            }
        }
    }

    fn on_saved(&mut self, result: CoreResult<E>, verb: &str) -> Vec<Effect> {
        match result {
            Ok(record) => {
                self.controller.finish_submit();
                self.notifier.success(format!("{verb} {}", record.label()), self.now);
                self.cache.invalidate();
                self.fetch_current()
            }
            Err(e) => {
                self.controller.fail_submit();
                self.notifier.error(e.user_message(), self.now);
                Vec::new()
            }
        }
    }

    fn on_deleted(&mut self, id: EntityId, result: CoreResult<()>) -> Vec<Effect> {
        let label = self
            .dialog
            .target()
            .filter(|t| t.id == id)
            .map_or_else(|| format!("#{id}"), |t| t.label.clone());
        match result {
            Ok(()) => {
                self.dialog.settle(id, Ok(()));
                if self.controller.selection() == Some(id) {
                    self.controller.reset();
                }
                let remaining = self.list.remove(id);
                self.pagination.after_delete(remaining);
                self.notifier.success(format!("Deleted {label}"), self.now);
                self.cache.invalidate();
                self.fetch_current()
            }
            Err(e) => {
                let message = e.user_message();
                self.dialog.settle(id, Err(message.clone()));
                self.notifier.error(message, self.now);
                Vec::new()
            }
        }
    }
}

/// Completion for a failed effect, used when the runtime cannot run it.
pub fn failed<E>(effect: &Effect, error: CoreError) -> PageMsg<E> {
    match effect {
        Effect::Fetch { request_id, query } => PageMsg::Fetched {
            request_id: *request_id,
            query: query.clone(),
            result: Err(error),
        },
        Effect::Create { .. } => PageMsg::Created(Err(error)),
        Effect::Update { .. } => PageMsg::Updated(Err(error)),
        Effect::Delete { id } => PageMsg::Deleted {
            id: *id,
            result: Err(error),
        },
        Effect::LoadOptions { field, .. } => PageMsg::OptionsLoaded {
            field,
            result: Err(error),
        },
    }
}
