//! The `Entity` abstraction shared by every master–detail page

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use maintdesk_client::EntityId;

use super::field::{FieldCodec, FieldValue};
use super::schema::{FieldKind, FieldSchema};
use crate::error::{CoreError, CoreResult};

/// Keyed access to an entity's fields.
pub trait FieldAccess {
    /// `None` for keys the entity does not have.
    fn field(&self, key: &str) -> Option<FieldValue>;

    fn set_field(&mut self, key: &str, value: FieldValue) -> CoreResult<()>;
}

/// A record type managed by one master–detail page.
pub trait Entity:
    FieldAccess
    + Clone
    + Default
    + Debug
    + PartialEq
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// REST collection name.
    const COLLECTION: &'static str;
    /// Page title.
    const TITLE: &'static str;

    /// Primary key; `0` until created.
    fn id(&self) -> EntityId;

    fn schema() -> &'static FieldSchema;

    /// Short human-readable name (confirmation dialogs, notifications).
    fn label(&self) -> String {
        let name = Self::schema()
            .fields()
            .first()
            .and_then(|spec| self.field(spec.key))
            .map(|value| value.display())
            .unwrap_or_default();
        if name.is_empty() {
            format!("#{}", self.id())
        } else {
            name
        }
    }

    /// Request body for create/update: no `id`, references collapsed to ids.
    fn to_payload(&self) -> CoreResult<Value> {
        let mut value = serde_json::to_value(self)?;
        let Some(object) = value.as_object_mut() else {
            return Err(CoreError::SerializationError(format!(
                "{} did not serialize to an object",
                Self::COLLECTION
            )));
        };
        object.remove("id");
        for spec in Self::schema().reference_fields() {
            let collapsed = match (spec.kind, self.field(spec.key)) {
                (FieldKind::Select(_), Some(FieldValue::Ref(r))) if r.is_set() => json!(r.id),
                (FieldKind::Select(_), _) => Value::Null,
                (FieldKind::MultiSelect(_), Some(FieldValue::Refs(refs))) => json!(
                    refs.iter()
                        .filter(|r| r.is_set())
                        .map(|r| r.id)
                        .collect::<Vec<_>>()
                ),
                _ => json!([]),
            };
            object.insert(spec.key.to_string(), collapsed);
        }
        Ok(value)
    }
}

/// Decode a [`FieldValue`] into a struct field's concrete type.
pub(crate) fn decode_field<T: FieldCodec>(key: &str, value: FieldValue) -> CoreResult<T> {
    T::from_field(value)
        .ok_or_else(|| CoreError::ValidationError(format!("field '{key}' does not accept that value")))
}

/// Implements [`FieldAccess`] by mapping wire keys to struct fields.
macro_rules! field_access {
    ($entity:ty { $($key:literal => $field:ident),+ $(,)? }) => {
        impl $crate::types::FieldAccess for $entity {
            fn field(&self, key: &str) -> Option<$crate::types::FieldValue> {
                match key {
                    $($key => Some($crate::types::FieldCodec::to_field(&self.$field)),)+
                    _ => None,
                }
            }

            fn set_field(
                &mut self,
                key: &str,
                value: $crate::types::FieldValue,
            ) -> $crate::error::CoreResult<()> {
                match key {
                    $($key => {
                        self.$field = $crate::types::entity::decode_field(key, value)?;
                        Ok(())
                    })+
                    _ => Err($crate::error::CoreError::UnknownField(key.to_string())),
                }
            }
        }
    };
}

pub(crate) use field_access;
