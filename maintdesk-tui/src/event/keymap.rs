//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One key with its modifiers
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// Default key bindings
pub struct DefaultKeymap;

impl DefaultKeymap {
    // Global
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::key(KeyCode::Char('?'));
    pub const SAVE: KeyBinding = KeyBinding::ctrl(KeyCode::Char('s'));
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Esc);

    // Tabs
    pub const TAB_NEXT: KeyBinding = KeyBinding::key(KeyCode::Right);
    pub const TAB_PREVIOUS: KeyBinding = KeyBinding::key(KeyCode::Left);
    pub const FOCUS_TOGGLE: KeyBinding = KeyBinding::key(KeyCode::Tab);

    // List
    pub const NAV_UP: KeyBinding = KeyBinding::key(KeyCode::Up);
    pub const NAV_DOWN: KeyBinding = KeyBinding::key(KeyCode::Down);
    pub const NAV_CONFIRM: KeyBinding = KeyBinding::key(KeyCode::Enter);
    pub const PAGE_NEXT: KeyBinding = KeyBinding::key(KeyCode::PageDown);
    pub const PAGE_PREVIOUS: KeyBinding = KeyBinding::key(KeyCode::PageUp);
    pub const SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('/'));

    // Record actions
    pub const ACTION_NEW: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
    pub const ACTION_EDIT: KeyBinding = KeyBinding::key(KeyCode::Char('e'));
    pub const ACTION_DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));
    pub const ACTION_REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));
    pub const DISMISS: KeyBinding = KeyBinding::key(KeyCode::Char('x'));

    // Delete dialog
    pub const CONFIRM_YES: KeyBinding = KeyBinding::key(KeyCode::Char('y'));
    pub const CONFIRM_NO: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
}
