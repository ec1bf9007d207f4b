//! Dirty-tracking detail form: a baseline plus a working copy

use crate::error::CoreResult;
use crate::types::{Entity, FieldError, FieldValue};

/// Shallow-merge patch: `(field key, new value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    changes: Vec<(String, FieldValue)>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.changes.push((key.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.changes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Working copy of one record compared against the last server-confirmed copy.
///
/// The baseline is only ever replaced wholesale; the working copy is a
/// separate clone, so edits never leak into the baseline.
#[derive(Debug, Clone)]
pub struct DetailForm<E: Entity> {
    baseline: E,
    working: E,
    reveal_errors: bool,
    pending: bool,
}

impl<E: Entity> Default for DetailForm<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> DetailForm<E> {
    /// Empty form (create mode).
    pub fn new() -> Self {
        Self::from_record(&E::default())
    }

    pub fn from_record(record: &E) -> Self {
        Self {
            baseline: record.clone(),
            working: record.clone(),
            reveal_errors: false,
            pending: false,
        }
    }

    pub fn baseline(&self) -> &E {
        &self.baseline
    }

    pub fn working(&self) -> &E {
        &self.working
    }

    /// Replace baseline and working copy with fresh copies of `record`.
    pub fn rebase(&mut self, record: &E) {
        self.baseline = record.clone();
        self.working = record.clone();
        self.reveal_errors = false;
    }

    pub fn clear(&mut self) {
        self.rebase(&E::default());
    }

    pub fn is_dirty(&self) -> bool {
        E::schema().differs(&self.working, &self.baseline)
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        E::schema().changed_fields(&self.working, &self.baseline)
    }

    /// Continuous validation of the working copy.
    pub fn errors(&self) -> Vec<FieldError> {
        E::schema().validate(&self.working)
    }

    pub fn error_for(&self, key: &str) -> Option<FieldError> {
        self.errors().into_iter().find(|e| e.key == key)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && self.is_dirty() && self.is_valid()
    }

    /// Whether controls should display their validation errors.
    pub fn errors_revealed(&self) -> bool {
        self.reveal_errors
    }

    pub fn reveal_errors(&mut self) {
        self.reveal_errors = true;
    }

    /// Apply a single field change to the working copy.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> CoreResult<()> {
        self.working.set_field(key, value)
    }

    /// Apply every change or none of them.
    pub fn apply(&mut self, patch: &FieldPatch) -> CoreResult<()> {
        let mut next = self.working.clone();
        for (key, value) in patch.iter() {
            next.set_field(key, value.clone())?;
        }
        self.working = next;
        Ok(())
    }

    /// Working copy := copy of baseline.
    pub fn discard(&mut self) {
        self.working = self.baseline.clone();
        self.reveal_errors = false;
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Client, Product, Reference};

    fn acme() -> Client {
        Client {
            id: 1,
            client_name: "Acme".into(),
            contact_number: "9999999999".into(),
            ..Client::default()
        }
    }

    #[test]
    fn clean_after_rebase_dirty_after_change() {
        let mut form = DetailForm::from_record(&acme());
        assert!(!form.is_dirty());
        assert!(
            form.set_field("clientName", FieldValue::Text("Acme Ltd".into()))
                .is_ok()
        );
        assert!(form.is_dirty());
        assert_eq!(form.changed_fields(), vec!["clientName"]);

        // Changing the value back makes the form clean again
        assert!(
            form.set_field("clientName", FieldValue::Text("Acme".into()))
                .is_ok()
        );
        assert!(!form.is_dirty());
    }

    #[test]
    fn nested_reference_edit_never_touches_baseline() {
        let product = Product {
            id: 2,
            product_name: "Chiller".into(),
            model_number: "CH-1".into(),
            vendor: Reference::new(3, "Bolt Works"),
            ..Product::default()
        };
        let mut form = DetailForm::from_record(&product);
        assert!(
            form.set_field("vendor", FieldValue::Ref(Reference::new(4, "Apex")))
                .is_ok()
        );
        assert_eq!(form.baseline().vendor, Reference::new(3, "Bolt Works"));
        assert_eq!(form.working().vendor.id, 4);
        assert!(form.is_dirty());
    }

    #[test]
    fn relabelled_reference_is_not_dirty() {
        let product = Product {
            vendor: Reference::new(3, ""),
            ..Product::default()
        };
        let mut form = DetailForm::from_record(&product);
        assert!(
            form.set_field("vendor", FieldValue::Ref(Reference::new(3, "Bolt Works")))
                .is_ok()
        );
        assert!(!form.is_dirty());
    }

    #[test]
    fn patch_is_all_or_nothing() {
        let mut form = DetailForm::<Client>::new();
        let patch = FieldPatch::new()
            .set("clientName", FieldValue::Text("Acme".into()))
            .set("contactNumber", FieldValue::Flag(true));
        assert!(form.apply(&patch).is_err());
        assert!(!form.is_dirty());
    }

    #[test]
    fn can_submit_requires_dirty_valid_and_idle() {
        let mut form = DetailForm::<Client>::new();
        assert!(!form.can_submit());

        let patch = FieldPatch::new().set("clientName", FieldValue::Text("Acme".into()));
        assert!(form.apply(&patch).is_ok());
        assert!(form.is_dirty());
        assert!(!form.is_valid());
        assert!(!form.can_submit());
        assert_eq!(
            form.error_for("contactNumber").map(|e| e.to_string()),
            Some("Contact Number is required".to_string())
        );

        assert!(
            form.set_field("contactNumber", FieldValue::Text("9999999999".into()))
                .is_ok()
        );
        assert!(form.can_submit());

        form.set_pending(true);
        assert!(!form.can_submit());
    }

    #[test]
    fn discard_restores_baseline_and_hides_errors() {
        let mut form = DetailForm::from_record(&acme());
        assert!(
            form.set_field("contactNumber", FieldValue::Text(String::new()))
                .is_ok()
        );
        form.reveal_errors();
        form.discard();
        assert!(!form.is_dirty());
        assert!(!form.errors_revealed());
        assert_eq!(form.working(), &acme());
    }
}
