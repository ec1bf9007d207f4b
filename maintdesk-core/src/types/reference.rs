//! `(id, label)` reference pairs

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use maintdesk_client::EntityId;

/// Selection of a foreign record: its id plus a display label.
///
/// `id == 0` means unset. Labels are decoration only; two references to the
/// same id are the same selection even if their labels differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    pub id: EntityId,
    pub label: String,
}

impl Reference {
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// The unset reference.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.id != 0
    }

    /// Same target record, ignoring labels.
    pub fn same_target(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_set() {
            Ok(())
        } else if self.label.is_empty() {
            write!(f, "#{}", self.id)
        } else {
            f.write_str(&self.label)
        }
    }
}

/// Accepted wire shapes: a bare id, `{id, label}` / `{id, name}`, or `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Id(EntityId),
    Object {
        #[serde(default)]
        id: EntityId,
        #[serde(default, alias = "name")]
        label: String,
    },
    Null,
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawReference::deserialize(deserializer)? {
            RawReference::Id(id) => Self::new(id, ""),
            RawReference::Object { id, label } => Self { id, label },
            RawReference::Null => Self::unset(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_every_wire_shape() {
        let bare: Reference = serde_json::from_value(json!(7)).unwrap_or_default();
        assert_eq!(bare, Reference::new(7, ""));

        let object: Reference =
            serde_json::from_value(json!({ "id": 3, "label": "Bolt Works" })).unwrap_or_default();
        assert_eq!(object, Reference::new(3, "Bolt Works"));

        let named: Reference =
            serde_json::from_value(json!({ "id": 4, "name": "Apex" })).unwrap_or_default();
        assert_eq!(named.label, "Apex");

        let null: Reference = serde_json::from_value(json!(null)).unwrap_or(Reference::new(9, "x"));
        assert!(!null.is_set());
    }

    #[test]
    fn display_falls_back_to_the_id() {
        assert_eq!(Reference::new(12, "").to_string(), "#12");
        assert_eq!(Reference::new(12, "Acme").to_string(), "Acme");
        assert_eq!(Reference::unset().to_string(), "");
    }

    #[test]
    fn same_target_ignores_labels() {
        assert!(Reference::new(5, "old").same_target(&Reference::new(5, "new")));
        assert!(!Reference::new(5, "a").same_target(&Reference::new(6, "a")));
    }
}
