use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let driver = match app.scroller.active_driver() {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        };
        let anchor = match app.anchor() {
            Some(anchor) => format!("{}+{}", anchor.position, anchor.offset),
            None => "?".to_string(),
        };
        let mode_str = if app.needs_fast_update() { "FLING" } else { "IDLE" };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | driver {} | anchor {} | scroll_by {}",
                mode_str,
                driver,
                anchor,
                app.host.stats().scroll_by_calls
            )
        };

        let help_hint = " q:quit j/k:row h/l:drag H/L:fling t:touch d:detach a:add c:clear ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
