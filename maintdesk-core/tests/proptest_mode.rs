use maintdesk_core::CoreError;
use maintdesk_core::editor::{FormMode, ModeController, SelectOutcome};
use maintdesk_core::types::{FieldValue, Vendor};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[derive(Debug, Clone)]
enum Action {
    Select(usize),
    Edit(usize),
    Reset,
    SetMode(FormMode),
    Type(String),
    BeginSubmit,
    FinishSubmit,
    FailSubmit,
}

fn vendors() -> Vec<Vendor> {
    ["Apex", "Bolt Works", "Crane Supply"]
        .iter()
        .zip(1_u64..)
        .map(|(name, id)| Vendor {
            id,
            vendor_name: (*name).to_string(),
            contact_number: "9876543210".into(),
            ..Vendor::default()
        })
        .collect()
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..3_usize).prop_map(Action::Select),
        (0..3_usize).prop_map(Action::Edit),
        Just(Action::Reset),
        prop_oneof![
            Just(FormMode::Create),
            Just(FormMode::Display),
            Just(FormMode::Edit),
        ]
        .prop_map(Action::SetMode),
        "[A-Za-z ]{1,12}".prop_map(Action::Type),
        Just(Action::BeginSubmit),
        Just(Action::FinishSubmit),
        Just(Action::FailSubmit),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn selection_tracks_mode_across_any_action_sequence(
        actions in prop::collection::vec(action(), 1..40)
    ) {
        let records = vendors();
        let mut c = ModeController::<Vendor>::new();
        for action in actions {
            let before = c.mode();
            let had_selection = c.selection().is_some();
            match action {
                Action::Select(i) => {
                    if c.select(&records[i]) == SelectOutcome::Selected {
                        prop_assert!(!c.form().is_dirty());
                        prop_assert_eq!(c.mode(), FormMode::Display);
                    }
                }
                Action::Edit(i) => {
                    if c.edit(&records[i]) == SelectOutcome::Selected {
                        prop_assert!(!c.form().is_dirty());
                    }
                    prop_assert_eq!(c.mode(), FormMode::Edit);
                }
                Action::Reset => {
                    c.reset();
                    prop_assert!(!c.form().is_dirty());
                    prop_assert_eq!(c.mode(), FormMode::Create);
                }
                Action::SetMode(next) => {
                    let result = c.set_mode(next);
                    if next != FormMode::Create && !had_selection {
                        prop_assert!(matches!(result, Err(CoreError::InvalidTransition(_))));
                        prop_assert_eq!(c.mode(), before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(c.mode(), next);
                    }
                    if next == FormMode::Create {
                        prop_assert!(!c.form().is_dirty());
                    }
                }
                Action::Type(text) => {
                    let result = c.set_field("vendorName", FieldValue::Text(text));
                    if before == FormMode::Display {
                        prop_assert!(matches!(result, Err(CoreError::ReadOnly)));
                    }
                }
                Action::BeginSubmit => {
                    let _ = c.begin_submit();
                }
                Action::FinishSubmit => {
                    c.finish_submit();
                    prop_assert!(!c.form().is_dirty());
                    prop_assert_eq!(c.mode(), FormMode::Create);
                }
                Action::FailSubmit => {
                    c.fail_submit();
                    prop_assert!(!c.form().is_pending());
                }
            }
            prop_assert_eq!(
                c.selection().is_some(),
                matches!(c.mode(), FormMode::Display | FormMode::Edit)
            );
            if c.mode() == FormMode::Display {
                prop_assert!(!c.form().is_dirty());
            }
        }
    }
}
