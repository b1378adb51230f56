use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, LABEL_WIDTH};
use crate::host::SimList;

/// Column captions, cycled across the table
const CAPTIONS: &[&str] = &[
    "open", "high", "東京", "low", "close", "café", "volume", "ソウル", "delta", "β",
];

pub struct SyncedTableWidget;

impl SyncedTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let title = format!(
            " Rows {}/{} synced | displacement {} ",
            app.scroller.members().len(),
            app.rows.len(),
            app.scroller.displacement()
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        let width = inner.width.saturating_sub(LABEL_WIDTH) as usize;
        let driver = app.scroller.active_driver();

        let lines: Vec<Line> = app
            .rows
            .iter()
            .enumerate()
            .filter_map(|(index, id)| app.host.list(*id).map(|list| (index, *id, list)))
            .map(|(index, id, list)| {
                let included = app.scroller.is_included(id);
                let marker = if Some(id) == driver {
                    Span::styled("▶", Style::default().fg(theme.driver))
                } else if included {
                    Span::styled("●", Style::default().fg(theme.green))
                } else {
                    Span::styled("○", Style::default().fg(theme.excluded))
                };

                let label_style = if index == app.selected {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.grey2)
                };

                let mut spans = vec![
                    marker,
                    Span::styled(
                        format!("{:<width$}", id.to_string(), width = LABEL_WIDTH as usize - 1),
                        label_style,
                    ),
                ];
                if list.is_attached() {
                    spans.extend(Self::cells(list, width, app));
                } else {
                    spans.push(Span::styled(
                        fit("detached", width),
                        Style::default().fg(theme.grey0),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Visible slice of a row, one span per cell
    fn cells<'a>(list: &SimList, width: usize, app: &App) -> Vec<Span<'a>> {
        let theme = &app.theme;
        let start = list.offset();
        let end = start + width as i64;
        let mut spans = Vec::new();

        for position in list.visible_range() {
            let size = list.item_sizes().get(position).copied().unwrap_or(0) as i64;
            let item_start = list.item_start(position);
            let skip = (start - item_start).max(0) as usize;
            let take = ((item_start + size).min(end) - item_start.max(start)).max(0) as usize;
            if take == 0 {
                continue;
            }

            let caption = format!("│{} {}", position, CAPTIONS[position % CAPTIONS.len()]);
            let text = slice_columns(&fit(&caption, size as usize), skip, take);
            let bg = if position % 2 == 0 { theme.bg1 } else { theme.bg2 };
            spans.push(Span::styled(text, Style::default().fg(theme.fg0).bg(bg)));
        }
        spans
    }
}

/// Pad or truncate `text` to exactly `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// Columns `skip..skip + take` of `text`. A wide character cut in half
/// becomes a space.
pub fn slice_columns(text: &str, skip: usize, take: usize) -> String {
    let mut out = String::new();
    let mut column = 0;
    let end = skip + take;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        let next = column + w;
        if next <= skip {
            column = next;
            continue;
        }
        if column >= end {
            break;
        }
        if column < skip || next > end {
            let visible = next.min(end) - column.max(skip);
            out.push_str(&" ".repeat(visible));
        } else {
            out.push(ch);
        }
        column = next;
    }
    out
}
