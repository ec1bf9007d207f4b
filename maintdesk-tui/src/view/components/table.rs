//! Record table

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use maintdesk_core::editor::RowState;

use crate::model::TabView;
use crate::view::theme::Styles;

/// Width of the cursor marker column.
const MARKER: u16 = 2;

pub fn render(view: &TabView, frame: &mut Frame, area: Rect) {
    if view.rows.is_empty() {
        render_placeholder(view, frame, area);
        return;
    }

    let columns = view.columns.len().max(1);
    let width = usize::from(area.width.saturating_sub(MARKER)) / columns;
    let cell_width = width.saturating_sub(1);

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(view.columns.iter().map(|c| Cell::from(fit(c, cell_width)))),
    )
    .style(Styles::title());

    let rows = view.rows.iter().map(|row| {
        let marker = if row.focused { "▶" } else { "" };
        let style = match row.state {
            RowState::Selected => Styles::selected(),
            RowState::Editing => Styles::editing(),
            RowState::Unselected => Style::default(),
        };
        Row::new(
            std::iter::once(Cell::from(marker))
                .chain(row.cells.iter().map(|c| Cell::from(fit(c, cell_width)))),
        )
        .style(style)
    });

    let widths = std::iter::once(Constraint::Length(MARKER))
        .chain(std::iter::repeat_n(Constraint::Fill(1), columns));

    let mut table = Table::new(rows, widths).header(header).column_spacing(1);
    if view.loading {
        table = table.style(Styles::muted());
    }
    frame.render_widget(table, area);
}

fn render_placeholder(view: &TabView, frame: &mut Frame, area: Rect) {
    let line = if let Some(error) = &view.error {
        Line::styled(format!("Could not load {}: {error}", view.title), Styles::error())
    } else if view.loading {
        Line::styled("Loading…", Styles::muted())
    } else if view.search_draft.is_empty() {
        Line::styled("No records yet. Press n to add one.", Styles::muted())
    } else {
        Line::styled("No records match the search.", Styles::muted())
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Truncate to `width` display columns, marking the cut with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept() {
        assert_eq!(fit("Acme", 10), "Acme");
        assert_eq!(fit("Acme", 4), "Acme");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(fit("Bolt Works Ltd", 6), "Bolt …");
        assert_eq!(fit("Bolt", 0), "");
    }

    #[test]
    fn wide_chars_count_double() {
        // each CJK char is two columns wide
        assert_eq!(fit("工具箱工具", 5), "工具…");
    }
}
