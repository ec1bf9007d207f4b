//! The object-safe tab interface and its render snapshot

use std::time::Instant;

use maintdesk_client::EntityId;
use maintdesk_core::editor::{
    DeleteTarget, FieldControl, FormActions, FormMode, Notification, PageLink, RowView,
};
use maintdesk_core::types::Reference;

use super::FormCursor;
use crate::message::TabMessage;

/// Everything the view needs to draw one tab.
#[derive(Debug, Clone)]
pub struct TabView {
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub loading: bool,
    pub error: Option<String>,

    pub mode: FormMode,
    pub selection: Option<EntityId>,
    /// Label of the record in the form (display / edit modes).
    pub record_label: String,
    pub controls: Vec<FieldControl<'static>>,
    pub actions: FormActions,
    pub form_cursor: FormCursor,
    /// Options of the focused reference field.
    pub options: Vec<Reference>,

    pub links: Vec<PageLink>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub items_per_page: u32,

    pub search_draft: String,
    pub search_waiting: bool,

    pub dialog: Option<DeleteTarget>,
    pub notifications: Vec<Notification>,
    /// Effects still running.
    pub busy: bool,
}

/// One entity page as seen by the app, update and event layers.
pub trait Tab {
    fn title(&self) -> &'static str;

    /// Load the list and reference options on first activation.
    fn mount(&mut self);

    fn dispatch(&mut self, msg: TabMessage);

    /// Advance the search debounce and expire notifications.
    fn tick(&mut self, now: Instant);

    /// Apply completions that have arrived; returns how many.
    fn drain(&mut self) -> usize;

    fn view(&self) -> TabView;

    fn has_dialog(&self) -> bool;

    fn is_dirty(&self) -> bool;
}
