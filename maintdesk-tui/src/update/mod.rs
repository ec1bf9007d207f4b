//! Update layer
//!
//! The only place that mutates the model. App-level messages are handled
//! here; tab intents are forwarded by [`tab::update`].

mod tab;

use std::time::Instant;

use crate::message::{AppMessage, TabMessage};
use crate::model::{App, FocusPanel};

pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }
        AppMessage::NextTab => app.next_tab(),
        AppMessage::PreviousTab => app.previous_tab(),
        AppMessage::SelectTab(index) => app.select_tab(index),
        AppMessage::ToggleFocus => {
            app.focus = app.focus.toggle();
        }
        AppMessage::FocusSearch => {
            app.focus = FocusPanel::Search;
        }
        AppMessage::SubmitSearch => {
            tab::update(app, TabMessage::SearchSubmit);
            app.focus = FocusPanel::List;
        }
        AppMessage::CancelSearch => {
            tab::update(app, TabMessage::SearchClear);
            app.focus = FocusPanel::List;
        }
        AppMessage::ToggleHelp => {
            app.show_help = !app.show_help;
        }
        AppMessage::Tab(tab_msg) => tab::update(app, tab_msg),
        AppMessage::Noop => {}
    }
}

/// Apply finished effects, then let every tab advance its timers.
///
/// Background tabs keep draining so a save started before switching away
/// still lands.
pub fn tick(app: &mut App, now: Instant) {
    for tab in &mut app.tabs {
        let applied = tab.drain();
        if applied > 0 {
            log::trace!("{}: applied {applied} completions", tab.title());
        }
        tab.tick(now);
    }
}
