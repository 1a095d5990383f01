use chrono::{DateTime, Utc};

use crate::app::App;
use crate::theme::{Theme, level_color};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let follow = if app.log_scroll.is_following() {
        ""
    } else {
        " [scrolled]"
    };
    let title = match app.task_id.as_deref() {
        Some(task_id) => format!(" Logs ({task_id}){follow} "),
        None => format!(" Logs{follow} "),
    };
    let block = Theme::block()
        .title(Span::styled(title, Style::new().fg(Theme::TEXT_SECONDARY)))
        .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.log_entries.is_empty() {
        let hint = Line::from(Span::styled(
            "No log output yet",
            Style::new().fg(Theme::TEXT_MUTED),
        ));
        frame.render_widget(Paragraph::new(hint), inner);
        return;
    }

    let lines: Vec<Line> = app
        .log_entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", format_timestamp(entry.timestamp)),
                    Style::new().fg(Theme::GUTTER),
                ),
                Span::styled(
                    format!("{:<11} ", entry.level),
                    Style::new().fg(level_color(entry.level)),
                ),
                Span::styled(
                    entry.message.clone(),
                    Style::new().fg(Theme::TEXT_CONTENT),
                ),
            ])
        })
        .collect();

    let top = app.log_scroll.top_line(lines.len(), inner.height as usize);
    let paragraph = Paragraph::new(lines).scroll((top as u16, 0));
    frame.render_widget(paragraph, inner);
}

/// Fractional unix seconds as `HH:MM:SS`; zero (missing) renders blank.
fn format_timestamp(ts: f64) -> String {
    if ts <= 0.0 {
        return " ".repeat(8);
    }
    DateTime::<Utc>::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(8))
}
