//! Bottom status bar

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use maintdesk_core::editor::FormMode;

use crate::model::{App, FocusPanel, TabView};
use crate::view::theme::Styles;

pub fn render(app: &App, view: Option<&TabView>, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app, view);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    if view.is_some_and(|v| v.busy || v.loading) {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled("working…", Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// Shortcut hints for whatever owns the keyboard
fn get_hints(app: &App, view: Option<&TabView>) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    if view.is_some_and(|v| v.dialog.is_some()) {
        hints.push(("y", "Delete"));
        hints.push(("n/Esc", "Keep"));
        return hints;
    }

    match app.focus {
        FocusPanel::List => {
            hints.push(("←→", "Tabs"));
            hints.push(("↑↓", "Move"));
            hints.push(("Enter", "Show"));
            hints.push(("e", "Edit"));
            hints.push(("n", "New"));
            hints.push(("d", "Delete"));
            hints.push(("/", "Search"));
            hints.push(("PgUp/PgDn", "Page"));
            hints.push(("Tab", "Form"));
            hints.push(("?", "Help"));
            hints.push(("q", "Quit"));
        }
        FocusPanel::Form => {
            hints.push(("↑↓", "Field"));
            if view.is_some_and(|v| v.mode != FormMode::Display) {
                hints.push(("←→", "Option"));
                hints.push(("Space", "Pick"));
                hints.push(("Enter", "Save"));
                hints.push(("Esc", "Cancel"));
            }
            hints.push(("Tab", "List"));
        }
        FocusPanel::Search => {
            hints.push(("Enter", "Search"));
            hints.push(("Esc", "Clear"));
        }
    }

    hints
}
