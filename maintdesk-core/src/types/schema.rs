//! Static field schemas: labels, kinds, required flags, format patterns

use std::fmt;

use regex::Regex;

use super::entity::FieldAccess;
use super::field::FieldValue;
use super::reference::Reference;

/// Where a select control loads its options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefSource {
    /// Collection to list, e.g. `"vendors"`.
    pub collection: &'static str,
    /// Row field used as the option label, e.g. `"vendorName"`.
    pub label_field: &'static str,
}

/// Input control kind for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Checkbox,
    /// Fixed set of textual options.
    Choice(&'static [&'static str]),
    /// Single reference to another collection.
    Select(RefSource),
    /// Several references to another collection.
    MultiSelect(RefSource),
}

impl FieldKind {
    /// Value of this kind in a freshly created record.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            Self::Text | Self::TextArea | Self::Choice(_) => FieldValue::Text(String::new()),
            Self::Number => FieldValue::Number(None),
            Self::Date => FieldValue::Date(None),
            Self::Checkbox => FieldValue::Flag(false),
            Self::Select(_) => FieldValue::Ref(Reference::unset()),
            Self::MultiSelect(_) => FieldValue::Refs(Vec::new()),
        }
    }

    pub fn reference_source(&self) -> Option<RefSource> {
        match self {
            Self::Select(source) | Self::MultiSelect(source) => Some(*source),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.reference_source().is_some()
    }
}

/// Format constraint on a textual field.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    regex: Regex,
    hint: &'static str,
}

impl FieldPattern {
    pub fn hint(&self) -> &'static str {
        self.hint
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Malformed(&'static str),
    NotAnOption,
}

/// Validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: &'static str,
    pub label: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{} is required", self.label),
            FieldProblem::Malformed(hint) => write!(f, "{} {hint}", self.label),
            FieldProblem::NotAnOption => write!(f, "{} has an unknown value", self.label),
        }
    }
}

/// One field of an entity.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Wire name (camelCase), also the key used in patches.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown as a list column.
    pub column: bool,
    pattern: Option<FieldPattern>,
}

impl FieldSpec {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            column: false,
            pattern: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn column(mut self) -> Self {
        self.column = true;
        self
    }

    /// Attach a format pattern. An invalid expression is logged and ignored.
    #[must_use]
    pub fn pattern(mut self, expression: &str, hint: &'static str) -> Self {
        match Regex::new(expression) {
            Ok(regex) => self.pattern = Some(FieldPattern { regex, hint }),
            Err(e) => log::error!("Invalid pattern for field {}: {e}", self.key),
        }
        self
    }

    pub fn format(&self) -> Option<&FieldPattern> {
        self.pattern.as_ref()
    }

    /// Check one value against this field's rules.
    pub fn check(&self, value: &FieldValue) -> Option<FieldProblem> {
        if !value.is_present() {
            return self.required.then_some(FieldProblem::Missing);
        }
        if let (FieldKind::Choice(options), Some(text)) = (self.kind, value.as_text())
            && !options.contains(&text)
        {
            return Some(FieldProblem::NotAnOption);
        }
        match (&self.pattern, value.as_text()) {
            (Some(pattern), Some(text)) if !pattern.is_match(text.trim()) => {
                Some(FieldProblem::Malformed(pattern.hint))
            }
            _ => None,
        }
    }
}

/// Ordered fields of one entity.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn columns(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.column)
    }

    pub fn reference_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_reference())
    }

    /// Keys whose values differ between two records.
    pub fn changed_fields<E: FieldAccess>(&self, a: &E, b: &E) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|spec| match (a.field(spec.key), b.field(spec.key)) {
                (Some(x), Some(y)) => !x.same_as(&y),
                (x, y) => x.is_some() != y.is_some(),
            })
            .map(|spec| spec.key)
            .collect()
    }

    /// Field-by-field structural comparison.
    pub fn differs<E: FieldAccess>(&self, a: &E, b: &E) -> bool {
        !self.changed_fields(a, b).is_empty()
    }

    pub fn validate<E: FieldAccess>(&self, record: &E) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|spec| {
                let value = record
                    .field(spec.key)
                    .unwrap_or_else(|| spec.kind.empty_value());
                spec.check(&value).map(|problem| FieldError {
                    key: spec.key,
                    label: spec.label,
                    problem,
                })
            })
            .collect()
    }
}

/// Ten-digit phone number.
pub const CONTACT_NUMBER_PATTERN: &str = r"^\d{10}$";
pub const CONTACT_NUMBER_HINT: &str = "must be 10 digits";

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const EMAIL_HINT: &str = "must be a valid email address";
