//! Event handler

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, TabMessage};
use crate::model::{App, FocusPanel};

/// Wait up to `timeout` for the next terminal event.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate an event into a message; resizes just trigger a redraw.
pub fn handle_event(event: &Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key) => handle_key_event(key, app),
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: &KeyEvent, app: &App) -> AppMessage {
    // Press only; Windows terminals also report release and repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if DefaultKeymap::FORCE_QUIT.matches(key) {
        return AppMessage::Quit;
    }

    if app.show_help {
        return AppMessage::ToggleHelp;
    }

    if app.active_tab().is_some_and(|tab| tab.has_dialog()) {
        return handle_dialog_keys(key);
    }

    if DefaultKeymap::SAVE.matches(key) {
        return AppMessage::Tab(TabMessage::Submit);
    }

    match app.focus {
        FocusPanel::List => handle_list_keys(key),
        FocusPanel::Form => handle_form_keys(key, app),
        FocusPanel::Search => handle_search_keys(key),
    }
}

/// Typed character, ignoring Shift (it is already folded into the char).
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => Some(c),
        _ => None,
    }
}

fn handle_dialog_keys(key: &KeyEvent) -> AppMessage {
    if DefaultKeymap::CONFIRM_YES.matches(key) || DefaultKeymap::NAV_CONFIRM.matches(key) {
        AppMessage::Tab(TabMessage::ConfirmDelete)
    } else if DefaultKeymap::CONFIRM_NO.matches(key) || DefaultKeymap::BACK.matches(key) {
        AppMessage::Tab(TabMessage::CancelDelete)
    } else {
        AppMessage::Noop
    }
}

fn handle_list_keys(key: &KeyEvent) -> AppMessage {
    if DefaultKeymap::QUIT.matches(key) {
        return AppMessage::Quit;
    }
    // Some terminals report '?' with Shift held
    if DefaultKeymap::HELP.matches(key) || typed_char(key) == Some('?') {
        return AppMessage::ToggleHelp;
    }
    if DefaultKeymap::TAB_NEXT.matches(key) {
        return AppMessage::NextTab;
    }
    if DefaultKeymap::TAB_PREVIOUS.matches(key) {
        return AppMessage::PreviousTab;
    }
    if DefaultKeymap::FOCUS_TOGGLE.matches(key) {
        return AppMessage::ToggleFocus;
    }
    if DefaultKeymap::SEARCH.matches(key) {
        return AppMessage::FocusSearch;
    }

    let bindings = [
        (DefaultKeymap::NAV_UP, TabMessage::CursorUp),
        (DefaultKeymap::NAV_DOWN, TabMessage::CursorDown),
        (DefaultKeymap::NAV_CONFIRM, TabMessage::Select),
        (DefaultKeymap::PAGE_NEXT, TabMessage::NextPage),
        (DefaultKeymap::PAGE_PREVIOUS, TabMessage::PreviousPage),
        (DefaultKeymap::ACTION_NEW, TabMessage::New),
        (DefaultKeymap::ACTION_EDIT, TabMessage::Edit),
        (DefaultKeymap::ACTION_DELETE, TabMessage::Delete),
        (DefaultKeymap::ACTION_REFRESH, TabMessage::Refresh),
        (DefaultKeymap::DISMISS, TabMessage::DismissNotification),
        (DefaultKeymap::BACK, TabMessage::Discard),
    ];
    if let Some((_, msg)) = bindings.iter().find(|(binding, _)| binding.matches(key)) {
        return AppMessage::Tab(*msg);
    }

    let tab = match key.code {
        KeyCode::Char('k') => TabMessage::CursorUp,
        KeyCode::Char('j') => TabMessage::CursorDown,
        KeyCode::Char('+' | '=') => TabMessage::MoreRows,
        KeyCode::Char('-') => TabMessage::FewerRows,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            return AppMessage::SelectTab(index);
        }
        _ => return AppMessage::Noop,
    };
    AppMessage::Tab(tab)
}

fn handle_form_keys(key: &KeyEvent, app: &App) -> AppMessage {
    if DefaultKeymap::FOCUS_TOGGLE.matches(key) || key.code == KeyCode::BackTab {
        return AppMessage::ToggleFocus;
    }
    if DefaultKeymap::BACK.matches(key) {
        // First Esc drops unsaved edits, the next one leaves the form
        let dirty = app.active_tab().is_some_and(|tab| tab.is_dirty());
        return if dirty {
            AppMessage::Tab(TabMessage::Discard)
        } else {
            AppMessage::ToggleFocus
        };
    }

    let tab = match key.code {
        KeyCode::Up => TabMessage::FieldPrevious,
        KeyCode::Down => TabMessage::FieldNext,
        KeyCode::Left => TabMessage::OptionPrevious,
        KeyCode::Right => TabMessage::OptionNext,
        KeyCode::Enter => TabMessage::Submit,
        KeyCode::Backspace => TabMessage::FieldBackspace,
        _ => match typed_char(key) {
            Some(c) => TabMessage::FieldInput(c),
            None => return AppMessage::Noop,
        },
    };
    AppMessage::Tab(tab)
}

fn handle_search_keys(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter => AppMessage::SubmitSearch,
        KeyCode::Esc => AppMessage::CancelSearch,
        KeyCode::Backspace => AppMessage::Tab(TabMessage::SearchBackspace),
        _ => typed_char(key).map_or(AppMessage::Noop, |c| {
            AppMessage::Tab(TabMessage::SearchInput(c))
        }),
    }
}
