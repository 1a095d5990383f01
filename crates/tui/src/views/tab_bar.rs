use crate::app::{App, Tab};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        (Tab::Chat, "1:Chat"),
        (Tab::Logs, "2:Logs"),
        (Tab::Files, "3:Files"),
    ];

    let mut spans = vec![Span::styled(" ", Style::new())];

    for (tab, label) in &tabs {
        let style = if *tab == app.tab {
            Style::new()
                .fg(Color::Black)
                .bg(Theme::ACCENT_BLUE)
                .bold()
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::new().fg(Theme::TAB_INACTIVE)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::styled(" ", Style::new()));
    }

    // Right-aligned connection warning, rendered over the same row.
    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line), area);

    if app.connection_lost {
        let warning = Line::from(Span::styled(
            "connection lost, retrying ",
            Style::new().fg(Theme::ACCENT_RED).bold(),
        ));
        frame.render_widget(Paragraph::new(warning).alignment(Alignment::Right), area);
    }
}
