//! Search line and page selector

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use maintdesk_core::editor::PageLink;

use crate::model::TabView;
use crate::view::theme::{Styles, colors};

pub fn render_search(view: &TabView, focused: bool, frame: &mut Frame, area: Rect) {
    let c = colors();
    let mut spans = vec![Span::styled(
        "Search: ",
        if focused {
            Style::default().fg(c.border_focused)
        } else {
            Styles::muted()
        },
    )];
    if view.search_draft.is_empty() && !focused {
        spans.push(Span::styled("press / to search", Styles::muted()));
    } else {
        spans.push(Span::raw(view.search_draft.clone()));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(c.border_focused)));
    }
    if view.search_waiting {
        spans.push(Span::styled("  …", Styles::muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render(view: &TabView, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(
            "{} records · {} per page  ",
            view.total_records, view.items_per_page
        ),
        Styles::muted(),
    )];
    spans.extend(page_spans(&view.links));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn page_spans(links: &[PageLink]) -> Vec<Span<'static>> {
    let c = colors();
    let mut spans = Vec::with_capacity(links.len() * 2);
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(match *link {
            PageLink::Page {
                number,
                current: true,
            } => Span::styled(
                format!("[{number}]"),
                Style::default()
                    .fg(c.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            PageLink::Page { number, .. } => Span::raw(number.to_string()),
            PageLink::Jump { .. } => Span::styled("…", Styles::muted()),
        });
    }
    spans
}
