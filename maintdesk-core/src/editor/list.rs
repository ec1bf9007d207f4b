//! Selection/list view over the current page of records

use maintdesk_client::EntityId;

use super::mode::{ModeController, RowState};
use crate::types::Entity;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: EntityId,
    pub cells: Vec<String>,
    pub state: RowState,
    /// Keyboard cursor is on this row.
    pub focused: bool,
}

/// Records of the visible page plus loading/error flags and a row cursor.
#[derive(Debug, Clone)]
pub struct ListView<E: Entity> {
    records: Vec<E>,
    cursor: usize,
    loading: bool,
    error: Option<String>,
    total_records: u64,
}

impl<E: Entity> Default for ListView<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            cursor: 0,
            loading: false,
            error: None,
            total_records: 0,
        }
    }
}

impl<E: Entity> ListView<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column headers from the schema.
    pub fn columns() -> Vec<&'static str> {
        E::schema().columns().map(|spec| spec.label).collect()
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: EntityId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn set_loading(&mut self) {
        self.loading = true;
    }

    pub(crate) fn set_page(&mut self, records: Vec<E>, total_records: u64) {
        self.records = records;
        self.total_records = total_records;
        self.loading = false;
        self.error = None;
        self.cursor = self.cursor.min(self.records.len().saturating_sub(1));
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Drop a deleted record locally; returns how many rows remain.
    pub(crate) fn remove(&mut self, id: EntityId) -> usize {
        self.records.retain(|r| r.id() != id);
        self.total_records = self.total_records.saturating_sub(1);
        self.cursor = self.cursor.min(self.records.len().saturating_sub(1));
        self.records.len()
    }

    // ========== Cursor ==========

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&E> {
        self.records.get(self.cursor)
    }

    pub fn cursor_down(&mut self) {
        if !self.records.is_empty() {
            self.cursor = (self.cursor + 1) % self.records.len();
        }
    }

    pub fn cursor_up(&mut self) {
        if !self.records.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.records.len() - 1);
        }
    }

    pub fn focus(&mut self, id: EntityId) {
        if let Some(pos) = self.records.iter().position(|r| r.id() == id) {
            self.cursor = pos;
        }
    }

    /// Rows with cells from the schema's column fields.
    pub fn rows(&self, controller: &ModeController<E>) -> Vec<RowView> {
        let columns: Vec<_> = E::schema().columns().collect();
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| RowView {
                id: record.id(),
                cells: columns
                    .iter()
                    .map(|spec| {
                        record
                            .field(spec.key)
                            .map(|v| v.display())
                            .unwrap_or_default()
                    })
                    .collect(),
                state: controller.row_state(record.id()),
                focused: i == self.cursor,
            })
            .collect()
    }
}
