//! Tri-state form mode coordinated with list selection

use std::fmt;

use serde_json::Value;

use maintdesk_client::EntityId;

use super::form::{DetailForm, FieldPatch};
use crate::error::{CoreError, CoreResult};
use crate::types::{Entity, FieldValue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormMode {
    #[default]
    Create,
    Display,
    Edit,
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Display => "display",
            Self::Edit => "edit",
        })
    }
}

/// Row highlight derived from mode and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Unselected,
    Selected,
    Editing,
}

/// Result of a row click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Form now shows the clicked record.
    Selected,
    /// The record was already selected; nothing changed.
    Unchanged,
}

/// A mutation built from the working copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create { payload: Value },
    Update { id: EntityId, payload: Value },
}

/// Which form buttons are shown and whether submit is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormActions {
    pub show_cancel: bool,
    pub show_submit: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub show_edit: bool,
    pub pending: bool,
}

/// Owns the form and keeps `selection.is_some() == (mode != Create)`.
#[derive(Debug, Clone)]
pub struct ModeController<E: Entity> {
    mode: FormMode,
    selection: Option<EntityId>,
    form: DetailForm<E>,
}

impl<E: Entity> Default for ModeController<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> ModeController<E> {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            selection: None,
            form: DetailForm::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn selection(&self) -> Option<EntityId> {
        self.selection
    }

    pub fn form(&self) -> &DetailForm<E> {
        &self.form
    }

    pub fn is_editable(&self) -> bool {
        self.mode != FormMode::Display
    }

    pub fn row_state(&self, id: EntityId) -> RowState {
        match (self.selection == Some(id), self.mode) {
            (true, FormMode::Edit) => RowState::Editing,
            (true, _) => RowState::Selected,
            (false, _) => RowState::Unselected,
        }
    }

    /// Show `record` in display mode. Re-selecting the current record is a no-op,
    /// selecting a different one discards unsaved edits.
    pub fn select(&mut self, record: &E) -> SelectOutcome {
        if self.selection == Some(record.id()) {
            return SelectOutcome::Unchanged;
        }
        if self.form.is_dirty() {
            log::debug!(
                "{}: discarding unsaved edits to select #{}",
                E::COLLECTION,
                record.id()
            );
        }
        self.selection = Some(record.id());
        self.form.rebase(record);
        self.mode = FormMode::Display;
        SelectOutcome::Selected
    }

    /// Select `record` if needed, then switch to edit mode.
    pub fn edit(&mut self, record: &E) -> SelectOutcome {
        let outcome = self.select(record);
        self.mode = FormMode::Edit;
        outcome
    }

    /// Back to an empty create form.
    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.selection = None;
        self.form.clear();
        self.form.set_pending(false);
    }

    pub fn set_mode(&mut self, next: FormMode) -> CoreResult<()> {
        if next == FormMode::Create {
            self.reset();
            return Ok(());
        }
        if self.selection.is_none() {
            return Err(CoreError::InvalidTransition(format!(
                "cannot enter {next} mode without a selected record"
            )));
        }
        if self.mode == FormMode::Edit && next == FormMode::Display {
            self.form.discard();
        }
        self.mode = next;
        Ok(())
    }

    pub fn set_field(&mut self, key: &str, value: FieldValue) -> CoreResult<()> {
        if !self.is_editable() {
            return Err(CoreError::ReadOnly);
        }
        self.form.set_field(key, value)
    }

    pub fn apply(&mut self, patch: &FieldPatch) -> CoreResult<()> {
        if !self.is_editable() {
            return Err(CoreError::ReadOnly);
        }
        self.form.apply(patch)
    }

    pub fn discard(&mut self) {
        self.form.discard();
    }

    /// Reveal validation errors and, if the form may be submitted, build the
    /// mutation and mark it pending. `Ok(None)` means nothing to send.
    pub fn begin_submit(&mut self) -> CoreResult<Option<Submission>> {
        if self.form.is_pending() {
            return Ok(None);
        }
        self.form.reveal_errors();
        if !self.form.can_submit() {
            return Ok(None);
        }
        let payload = self.form.working().to_payload()?;
        let submission = match (self.mode, self.selection) {
            (FormMode::Create, _) => Submission::Create { payload },
            (FormMode::Edit, Some(id)) => Submission::Update { id, payload },
            _ => return Ok(None),
        };
        self.form.set_pending(true);
        Ok(Some(submission))
    }

    /// Mutation succeeded: return to create mode.
    pub fn finish_submit(&mut self) {
        self.reset();
    }

    /// Mutation failed: keep mode, baseline and working copy.
    pub fn fail_submit(&mut self) {
        self.form.set_pending(false);
    }

    pub fn actions(&self) -> FormActions {
        let pending = self.form.is_pending();
        FormActions {
            show_cancel: self.form.is_dirty(),
            show_submit: self.mode != FormMode::Display,
            submit_enabled: self.mode != FormMode::Display && self.form.can_submit(),
            submit_label: match self.mode {
                FormMode::Create => "Create",
                _ => "Save",
            },
            show_edit: self.mode == FormMode::Display,
            pending,
        }
    }
}
