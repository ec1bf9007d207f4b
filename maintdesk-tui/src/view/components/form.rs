//! Detail form

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use maintdesk_core::editor::{FieldControl, FormActions, FormMode};
use maintdesk_core::types::{FieldKind, FieldValue, Reference};

use crate::model::{FormCursor, TabView};
use crate::view::theme::{Styles, colors};

pub fn render(view: &TabView, focused: bool, frame: &mut Frame, area: Rect) {
    let title = match view.mode {
        FormMode::Create => format!(" New {} ", singular(view.title)),
        FormMode::Display => format!(" {} ", view.record_label),
        FormMode::Edit => format!(" Editing {} ", view.record_label),
    };
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    let mut focused_line = 0;
    for (i, control) in view.controls.iter().enumerate() {
        let is_current = focused && i == view.form_cursor.field;
        if is_current {
            focused_line = lines.len();
        }
        lines.extend(control_lines(control, i, &view.form_cursor, is_current, &view.options));
    }
    lines.push(Line::from(""));
    lines.push(actions_line(view.actions));

    // Keep the focused field on screen
    let height = usize::from(inner.height);
    let offset = (focused_line + 3).saturating_sub(height);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

/// "Clients" → "Client", "Service Entries" → "Service Entry".
fn singular(title: &str) -> String {
    if let Some(stem) = title.strip_suffix("ies") {
        format!("{stem}y")
    } else {
        title.strip_suffix('s').unwrap_or(title).to_string()
    }
}

fn control_lines(
    control: &FieldControl<'static>,
    index: usize,
    cursor: &FormCursor,
    current: bool,
    options: &[Reference],
) -> Vec<Line<'static>> {
    let c = colors();
    let marker = if current { "▶ " } else { "  " };
    let required = if control.spec.required { " *" } else { "" };
    let label_style = if current {
        Style::default()
            .fg(c.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.fg)
    };

    let value = cursor
        .pending_text(index)
        .map_or_else(|| value_text(control), str::to_string);
    let value_style = if control.enabled {
        Style::default().fg(c.fg)
    } else {
        Styles::muted()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(control.spec.label, label_style),
            Span::styled(required, Styles::error()),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(value, value_style),
            Span::raw(if current && control.enabled && is_typed(control.spec.kind) {
                "▏"
            } else {
                ""
            }),
        ]),
    ];

    if current && control.enabled && control.spec.kind.is_reference() {
        lines.push(options_line(control, cursor.option, options));
    }

    let error = if current {
        cursor.buffer_error.clone().or_else(|| control.error.clone())
    } else {
        control.error.clone()
    };
    if let Some(error) = error {
        lines.push(Line::styled(format!("    {error}"), Styles::error()));
    }
    lines
}

fn is_typed(kind: FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Date
    )
}

fn value_text(control: &FieldControl<'_>) -> String {
    match (&control.value, control.spec.kind) {
        (FieldValue::Flag(on), _) => (if *on { "[x]" } else { "[ ]" }).to_string(),
        (FieldValue::Ref(r), _) if !r.is_set() => "(none)".to_string(),
        (FieldValue::Refs(refs), _) if refs.is_empty() => "(none)".to_string(),
        (value, FieldKind::Choice(_)) if value.display().is_empty() => "(none)".to_string(),
        (value, _) => value.display(),
    }
}

/// `◀ Bolt Works ▶  2/5  space to pick`
fn options_line(control: &FieldControl<'_>, highlighted: usize, options: &[Reference]) -> Line<'static> {
    let c = colors();
    let Some(option) = options.get(highlighted) else {
        return Line::styled("    no options loaded", Styles::muted());
    };
    let chosen = match &control.value {
        FieldValue::Ref(r) => r.same_target(option),
        FieldValue::Refs(refs) => refs.iter().any(|r| r.same_target(option)),
        _ => false,
    };
    Line::from(vec![
        Span::raw("    ◀ "),
        Span::styled(
            option.label.clone(),
            Style::default()
                .fg(if chosen { c.success } else { c.highlight })
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ▶  "),
        Span::styled(
            format!("{}/{}  space to pick", highlighted + 1, options.len()),
            Styles::muted(),
        ),
    ])
}

fn actions_line(actions: FormActions) -> Line<'static> {
    let c = colors();
    let mut spans = vec![Span::raw("  ")];
    if actions.pending {
        spans.push(Span::styled("Saving…", Style::default().fg(c.warning)));
        return Line::from(spans);
    }
    if actions.show_submit {
        let style = if actions.submit_enabled {
            Style::default().fg(c.success).add_modifier(Modifier::BOLD)
        } else {
            Styles::muted()
        };
        spans.push(Span::styled(format!("[Ctrl+S] {}", actions.submit_label), style));
        spans.push(Span::raw("  "));
    }
    if actions.show_cancel {
        spans.push(Span::styled("[Esc] Cancel", Style::default().fg(c.fg)));
        spans.push(Span::raw("  "));
    }
    if actions.show_edit {
        spans.push(Span::styled("[e] Edit", Style::default().fg(c.fg)));
    }
    Line::from(spans)
}
