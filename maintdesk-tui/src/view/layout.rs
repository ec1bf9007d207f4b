//! Main layout

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{App, Tab, TabView};

use super::components;
use super::theme::{Styles, colors};

/// Render one frame
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // Title bar + tab bar + content + status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(app, frame, rows[0]);
    components::tabs::render(app, frame, rows[1]);

    let view = app.active_tab().map(Tab::view);
    if let Some(view) = &view {
        render_content(app, view, frame, rows[2]);
    }

    components::statusbar::render(app, view.as_ref(), frame, rows[3]);

    // Overlays, topmost last
    if let Some(view) = &view {
        components::notifications::render(view, frame, rows[2]);
        if let Some(target) = &view.dialog {
            components::modal::render_delete(target, frame);
        }
    }
    if app.show_help {
        components::modal::render_help(frame);
    }
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let session = if app.signed_in {
        Span::raw("signed in")
    } else {
        Span::styled("not signed in (run `maintdesk login`)", Style::default().fg(c.warning))
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" Maintenance Console v{}", env!("CARGO_PKG_VERSION")),
            Styles::title(),
        ),
        Span::raw(format!("  {}  ", app.base_url)),
        session,
    ]);
    let title = Paragraph::new(line).style(Style::default().bg(c.border).fg(c.fg));
    frame.render_widget(title, area);
}

/// List panel on the left, detail form on the right.
fn render_content(app: &App, view: &TabView, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    let list_focused = !app.focus.is_form();
    let block = Block::default()
        .title(format!(" {} ", view.title))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(list_focused));
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    let list_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    components::pagination::render_search(view, app.focus.is_search(), frame, list_rows[0]);
    components::table::render(view, frame, list_rows[1]);
    components::pagination::render(view, frame, list_rows[2]);

    components::form::render(view, app.focus.is_form(), frame, columns[1]);
}
