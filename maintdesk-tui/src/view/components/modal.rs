//! Modal dialogs

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use maintdesk_core::editor::DeleteTarget;

use crate::util::{LOG_FILE, log_dir};

/// Centered area of at most `width` x `height`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

pub fn render_delete(target: &DeleteTarget, frame: &mut Frame) {
    let area = centered_rect(48, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm Deletion ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::styled("Delete this record?", Style::default().fg(Color::White)),
        Line::styled(
            format!("\"{}\"", target.label),
            Style::default().fg(Color::Yellow),
        ),
        Line::from(""),
    ];
    if target.pending {
        lines.push(Line::styled("Deleting…", Style::default().fg(Color::DarkGray)));
    } else {
        if let Some(error) = &target.error {
            lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
        }
        lines.push(Line::from(vec![
            Span::styled(" y ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" delete    "),
            Span::styled(" n ", Style::default().fg(Color::Black).bg(Color::White)),
            Span::raw(" keep"),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner(area),
    );
}

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 24, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, area);

    let heading = |text: &'static str| {
        Line::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<10}"), Style::default().fg(Color::Yellow)),
            Span::styled(desc, Style::default().fg(Color::White)),
        ])
    };

    let lines = vec![
        heading("List"),
        key("←→ / 1-9", "Switch entity"),
        key("↑↓ / jk", "Move cursor"),
        key("Enter", "Show record"),
        key("e / n / d", "Edit / new / delete"),
        key("/", "Search (Enter now, Esc clears)"),
        key("PgUp PgDn", "Previous / next page"),
        key("+ / -", "More / fewer rows per page"),
        key("r / x", "Reload / dismiss message"),
        Line::from(""),
        heading("Form"),
        key("↑↓", "Previous / next field"),
        key("←→ Space", "Browse / pick option"),
        key("Enter", "Save (also Ctrl+S)"),
        key("Esc", "Discard changes"),
        key("Tab", "Back to the list"),
        Line::from(""),
        Line::styled(
            format!("Log: {}", log_dir().join(LOG_FILE).display()),
            Style::default().fg(Color::DarkGray),
        ),
        Line::styled("Press any key to close", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(lines), inner(area));
}
