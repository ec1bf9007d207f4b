//! Delete confirmation dialog state machine

use maintdesk_client::EntityId;

/// Record awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: EntityId,
    pub label: String,
    pub pending: bool,
    /// Error from the last failed attempt.
    pub error: Option<String>,
}

/// `Closed` → `Open` → `Open { pending }` → `Closed` on success, or back to
/// `Open` with an error on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteDialog {
    #[default]
    Closed,
    Open(DeleteTarget),
}

impl DeleteDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Open(t) if t.pending)
    }

    pub fn target(&self) -> Option<&DeleteTarget> {
        match self {
            Self::Open(target) => Some(target),
            Self::Closed => None,
        }
    }

    /// Ask for confirmation. Ignored while another delete is in flight.
    pub fn open(&mut self, id: EntityId, label: impl Into<String>) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Open(DeleteTarget {
            id,
            label: label.into(),
            pending: false,
            error: None,
        });
        true
    }

    /// Returns the id to delete, or `None` when closed or already pending.
    pub fn confirm(&mut self) -> Option<EntityId> {
        match self {
            Self::Open(target) if !target.pending => {
                target.pending = true;
                target.error = None;
                Some(target.id)
            }
            _ => None,
        }
    }

    /// Close the dialog. Ignored while pending.
    pub fn cancel(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Closed;
        true
    }

    /// Apply the outcome of the delete for `id`.
    pub fn settle(&mut self, id: EntityId, result: Result<(), String>) {
        let Self::Open(target) = self else {
            return;
        };
        if target.id != id {
            return;
        }
        match result {
            Ok(()) => *self = Self::Closed,
            Err(message) => {
                target.pending = false;
                target.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut d = DeleteDialog::default();
        assert_eq!(d.confirm(), None);
        assert!(d.open(4, "Bolt Works"));
        assert_eq!(d.confirm(), Some(4));
        assert!(d.is_pending());
        d.settle(4, Ok(()));
        assert_eq!(d, DeleteDialog::Closed);
    }

    #[test]
    fn pending_ignores_confirm_cancel_and_open() {
        let mut d = DeleteDialog::default();
        d.open(4, "Bolt Works");
        d.confirm();
        assert_eq!(d.confirm(), None);
        assert!(!d.cancel());
        assert!(!d.open(5, "Apex"));
        assert_eq!(d.target().map(|t| t.id), Some(4));
    }

    #[test]
    fn failure_reopens_with_error_for_retry() {
        let mut d = DeleteDialog::default();
        d.open(4, "Bolt Works");
        d.confirm();
        d.settle(4, Err("in use by 3 products".into()));
        let target = d.target().cloned();
        assert!(matches!(target, Some(DeleteTarget { pending: false, error: Some(_), .. })));
        assert_eq!(d.confirm(), Some(4));
        assert!(d.target().is_some_and(|t| t.error.is_none()));
        d.settle(4, Err("still in use".into()));
        assert!(d.cancel());
        assert!(!d.is_open());
    }

    #[test]
    fn settle_for_another_record_is_ignored() {
        let mut d = DeleteDialog::default();
        d.open(4, "Bolt Works");
        d.confirm();
        d.settle(9, Ok(()));
        assert!(d.is_pending());
    }
}
