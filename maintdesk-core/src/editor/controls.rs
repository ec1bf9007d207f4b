//! Render-ready field controls and text-input parsing

use chrono::NaiveDate;

use super::mode::ModeController;
use crate::types::{DATE_FORMAT, Entity, FieldKind, FieldSpec, FieldValue, Reference};

/// One control in the detail form.
#[derive(Debug, Clone)]
pub struct FieldControl<'a> {
    pub spec: &'a FieldSpec,
    pub value: FieldValue,
    pub enabled: bool,
    /// Whether the value currently passes validation.
    pub valid: bool,
    /// Error text; only filled once errors are revealed.
    pub error: Option<String>,
}

/// Controls for every schema field, in schema order.
pub fn field_controls<E: Entity>(controller: &ModeController<E>) -> Vec<FieldControl<'static>> {
    let form = controller.form();
    let errors = form.errors();
    let reveal = form.errors_revealed();
    E::schema()
        .fields()
        .iter()
        .map(|spec| {
            let error = errors.iter().find(|e| e.key == spec.key);
            FieldControl {
                spec,
                value: form
                    .working()
                    .field(spec.key)
                    .unwrap_or_else(|| spec.kind.empty_value()),
                enabled: controller.is_editable() && !form.is_pending(),
                valid: error.is_none(),
                error: error.filter(|_| reveal).map(ToString::to_string),
            }
        })
        .collect()
}

/// Parse typed text into a value for `kind`.
///
/// Checkbox and reference kinds are not typed; use [`toggle`] and
/// [`toggle_reference`] for those.
pub fn parse_input(kind: &FieldKind, text: &str) -> Result<FieldValue, String> {
    let trimmed = text.trim();
    match kind {
        FieldKind::Text | FieldKind::TextArea | FieldKind::Choice(_) => {
            Ok(FieldValue::Text(text.to_string()))
        }
        FieldKind::Number if trimmed.is_empty() => Ok(FieldValue::Number(None)),
        FieldKind::Number => trimmed
            .parse::<i64>()
            .map(|n| FieldValue::Number(Some(n)))
            .map_err(|_| format!("'{trimmed}' is not a whole number")),
        FieldKind::Date if trimmed.is_empty() => Ok(FieldValue::Date(None)),
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(|d| FieldValue::Date(Some(d)))
            .map_err(|_| format!("'{trimmed}' is not a date (YYYY-MM-DD)")),
        FieldKind::Checkbox | FieldKind::Select(_) | FieldKind::MultiSelect(_) => {
            Err("this field is not typed".to_string())
        }
    }
}

/// Flip a checkbox value.
pub fn toggle(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Flag(b) => FieldValue::Flag(!b),
        other => other.clone(),
    }
}

/// Pick `option` for a select, or add/remove it for a multi-select.
pub fn toggle_reference(value: &FieldValue, option: &Reference) -> FieldValue {
    match value {
        FieldValue::Ref(current) if current.same_target(option) => {
            FieldValue::Ref(Reference::unset())
        }
        FieldValue::Ref(_) => FieldValue::Ref(option.clone()),
        FieldValue::Refs(refs) => {
            let mut refs: Vec<Reference> = refs.iter().filter(|r| r.is_set()).cloned().collect();
            if let Some(pos) = refs.iter().position(|r| r.same_target(option)) {
                refs.remove(pos);
            } else {
                refs.push(option.clone());
            }
            FieldValue::Refs(refs)
        }
        other => other.clone(),
    }
}

/// Next option of a choice field, wrapping around.
pub fn cycle_choice(options: &[&str], value: &FieldValue) -> FieldValue {
    let current = value.as_text().unwrap_or_default();
    let next = options
        .iter()
        .position(|o| *o == current)
        .map_or(0, |i| (i + 1) % options.len().max(1));
    FieldValue::Text(options.get(next).copied().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Client, REQUEST_STATUSES};

    #[test]
    fn parses_numbers_and_dates() {
        assert_eq!(
            parse_input(&FieldKind::Number, " 12 "),
            Ok(FieldValue::Number(Some(12)))
        );
        assert_eq!(parse_input(&FieldKind::Number, ""), Ok(FieldValue::Number(None)));
        assert!(parse_input(&FieldKind::Number, "twelve").is_err());
        assert_eq!(
            parse_input(&FieldKind::Date, "2024-02-29"),
            Ok(FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29)))
        );
        assert!(parse_input(&FieldKind::Date, "2023-02-29").is_err());
        assert!(parse_input(&FieldKind::Checkbox, "x").is_err());
    }

    #[test]
    fn multi_select_toggles_membership() {
        let pump = Reference::new(1, "Pump");
        let belt = Reference::new(2, "Belt");
        let value = FieldValue::Refs(vec![pump.clone()]);
        let added = toggle_reference(&value, &belt);
        assert_eq!(added, FieldValue::Refs(vec![pump.clone(), belt.clone()]));
        let removed = toggle_reference(&added, &Reference::new(1, ""));
        assert_eq!(removed, FieldValue::Refs(vec![belt]));
    }

    #[test]
    fn single_select_replaces_or_clears() {
        let pump = Reference::new(1, "Pump");
        let picked = toggle_reference(&FieldValue::Ref(Reference::unset()), &pump);
        assert_eq!(picked, FieldValue::Ref(pump.clone()));
        assert_eq!(
            toggle_reference(&picked, &pump),
            FieldValue::Ref(Reference::unset())
        );
    }

    #[test]
    fn choice_cycles_through_options() {
        let empty = FieldValue::Text(String::new());
        let open = cycle_choice(REQUEST_STATUSES, &empty);
        assert_eq!(open, FieldValue::Text("Open".into()));
        let closed = FieldValue::Text("Closed".into());
        assert_eq!(cycle_choice(REQUEST_STATUSES, &closed), open);
    }

    #[test]
    fn controls_hide_errors_until_revealed() {
        let mut controller = ModeController::<Client>::new();
        let controls = field_controls(&controller);
        let name = controls.iter().find(|c| c.spec.key == "clientName");
        assert!(name.is_some_and(|c| !c.valid && c.error.is_none() && c.enabled));

        assert!(matches!(controller.begin_submit(), Ok(None)));
        let controls = field_controls(&controller);
        let name = controls.iter().find(|c| c.spec.key == "clientName");
        assert_eq!(
            name.and_then(|c| c.error.clone()),
            Some("Client Name is required".to_string())
        );
    }
}
