//! Entity tab bar

use ratatui::{Frame, layout::Rect, widgets::Tabs};

use crate::model::App;
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let titles = app
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.title()));

    let tabs = Tabs::new(titles)
        .select(app.active)
        .style(Styles::muted())
        .highlight_style(Styles::selected())
        .divider("│");

    frame.render_widget(tabs, area);
}
