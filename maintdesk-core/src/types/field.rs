//! Field values and their conversion to and from entity struct fields

use chrono::NaiveDate;

use super::reference::Reference;

/// Date format used on the wire and in inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<i64>),
    Date(Option<NaiveDate>),
    Flag(bool),
    Ref(Reference),
    Refs(Vec<Reference>),
}

impl FieldValue {
    /// Whether a required-field check passes. Checkboxes always count as present.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Number(n) => n.is_some(),
            Self::Date(d) => d.is_some(),
            Self::Flag(_) => true,
            Self::Ref(r) => r.is_set(),
            Self::Refs(refs) => refs.iter().any(Reference::is_set),
        }
    }

    /// Structural equality where references compare by id only.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ref(a), Self::Ref(b)) => a.same_target(b),
            (Self::Refs(a), Self::Refs(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_target(y))
            }
            _ => self == other,
        }
    }

    /// Text shown in list cells and read-only controls.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.map(|n| n.to_string()).unwrap_or_default(),
            Self::Date(d) => d
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            Self::Flag(true) => "Yes".to_string(),
            Self::Flag(false) => "No".to_string(),
            Self::Ref(r) => r.to_string(),
            Self::Refs(refs) => refs
                .iter()
                .filter(|r| r.is_set())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Text used for format (pattern) checks, if this is a textual value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Conversion between a concrete struct field and [`FieldValue`].
pub trait FieldCodec: Sized {
    fn to_field(&self) -> FieldValue;

    /// `None` when the value has the wrong shape for this field.
    fn from_field(value: FieldValue) -> Option<Self>;
}

impl FieldCodec for String {
    fn to_field(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FieldCodec for Option<i64> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Number(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl FieldCodec for Option<NaiveDate> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Date(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl FieldCodec for bool {
    fn to_field(&self) -> FieldValue {
        FieldValue::Flag(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Flag(b) => Some(b),
            _ => None,
        }
    }
}

impl FieldCodec for Reference {
    fn to_field(&self) -> FieldValue {
        FieldValue::Ref(self.clone())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Ref(r) => Some(r),
            _ => None,
        }
    }
}

impl FieldCodec for Vec<Reference> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Refs(self.clone())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Refs(refs) => Some(refs),
            _ => None,
        }
    }
}
