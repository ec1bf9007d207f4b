//! Toast notifications in the top-right corner

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use maintdesk_core::editor::NotificationLevel;

use crate::model::TabView;
use crate::view::theme::Styles;

/// At most this many toasts are drawn, newest last.
const VISIBLE: usize = 3;
const WIDTH: u16 = 44;

pub fn render(view: &TabView, frame: &mut Frame, area: Rect) {
    let shown = &view.notifications[view.notifications.len().saturating_sub(VISIBLE)..];
    if shown.is_empty() {
        return;
    }

    let width = WIDTH.min(area.width);
    let mut y = area.y;
    for notification in shown {
        let height = 3;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, height);
        let style = Styles::notification(notification.level);
        let title = match notification.level {
            NotificationLevel::Info => " Info ",
            NotificationLevel::Success => " Done ",
            NotificationLevel::Error => " Error ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(style);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::styled(notification.message.clone(), style))
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
        y += height;
    }
}
