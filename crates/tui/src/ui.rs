use crate::app::{App, Tab};
use crate::theme::Theme;
use crate::views::{chat, files, logs, tab_bar};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [tab_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    tab_bar::render(frame, app, tab_area);

    match app.tab {
        Tab::Chat => chat::render(frame, app, body_area),
        Tab::Logs => logs::render(frame, app, body_area),
        Tab::Files => files::render(frame, app, body_area),
    }

    render_footer(frame, app, footer_area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let mut spans = match app.tab {
        Tab::Chat => vec![
            Span::styled(" Enter ", key_style),
            Span::styled("send  ", desc_style),
            Span::styled("Up/Down ", key_style),
            Span::styled("scroll  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("view  ", desc_style),
            Span::styled("Ctrl-C ", key_style),
            Span::styled("quit", desc_style),
        ],
        Tab::Logs => vec![
            Span::styled(" j/k ", key_style),
            Span::styled("scroll  ", desc_style),
            Span::styled("f ", key_style),
            Span::styled("follow  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("view  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ],
        Tab::Files => vec![
            Span::styled(" r ", key_style),
            Span::styled("refresh plan  ", desc_style),
            Span::styled("/ ", key_style),
            Span::styled("open file  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("view  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ],
    };

    if app.busy {
        spans.push(Span::styled("  |  ", Style::new().fg(Theme::GUTTER)));
        spans.push(Span::styled(
            "task running",
            Style::new().fg(Theme::ACCENT_BLUE),
        ));
    } else if app.awaiting_human {
        spans.push(Span::styled("  |  ", Style::new().fg(Theme::GUTTER)));
        spans.push(Span::styled(
            "waiting for your answer",
            Style::new().fg(Theme::ACCENT_YELLOW).bold(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
