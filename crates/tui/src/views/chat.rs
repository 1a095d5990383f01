use crate::app::App;
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let [transcript_area, question_area, input_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(question_height(app)),
        Constraint::Length(3),
    ])
    .areas(area);

    render_transcript(frame, app, transcript_area);
    if question_height(app) > 0 {
        render_question(frame, app, question_area);
    }
    render_input(frame, app, input_area);
}

fn question_height(app: &App) -> u16 {
    if app.pending_question.is_some() { 3 } else { 0 }
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Theme::block().padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.visible_messages() {
        let (prefix, style) = if message.is_step_header {
            ("── ", Style::new().fg(Theme::ACCENT_ORANGE).bold())
        } else if message.is_question {
            ("? ", Style::new().fg(Theme::ACCENT_YELLOW).bold())
        } else if message.sender == agentdeck_core::Sender::User {
            ("> ", Style::new().fg(Theme::ROLE_USER))
        } else {
            ("  ", Style::new().fg(Theme::ROLE_AGENT))
        };
        for (i, text) in message.content.lines().enumerate() {
            let gutter = if i == 0 { prefix } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(gutter, Style::new().fg(Theme::GUTTER)),
                Span::styled(text.to_string(), style),
            ]));
        }
    }

    let top = app
        .chat_scroll
        .top_line(lines.len(), inner.height as usize);
    let paragraph = Paragraph::new(lines).scroll((top as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn render_question(frame: &mut Frame, app: &App, area: Rect) {
    let question = app.pending_question.as_deref().unwrap_or_default();
    let block = Theme::block_accent().title(" Question ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let line = Line::from(Span::styled(
        question.to_string(),
        Style::new().fg(Theme::ACCENT_YELLOW),
    ));
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let (block, text_style) = if app.input_enabled() {
        (Theme::block(), Style::new().fg(Theme::TEXT_PRIMARY))
    } else {
        (Theme::block_dim(), Style::new().fg(Theme::TEXT_MUTED))
    };
    let title = if let Some(ref notice) = app.notice {
        Line::from(Span::styled(
            format!(" {notice} "),
            Style::new().fg(Theme::ACCENT_RED),
        ))
    } else if app.input_enabled() {
        Line::from(Span::styled(
            " Message ",
            Style::new().fg(Theme::TEXT_SECONDARY),
        ))
    } else {
        Line::from(Span::styled(
            " Working... ",
            Style::new().fg(Theme::TEXT_MUTED),
        ))
    };
    let block = block.title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(app.input.clone(), text_style)];
    if app.input_enabled() {
        spans.push(Span::styled("_", Style::new().fg(Theme::ACCENT_BLUE)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::app::App;
    use agentdeck_core::{LogEntry, LogLevel};
    use agentdeck_poller::{PollerEvent, PollerEventKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, app, area);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with_task() -> App {
        let mut app = App::new();
        app.input = "do the thing".to_string();
        app.submit_input();
        app.apply_command_result(crate::async_ops::CommandResult::Send(Ok(
            agentdeck_api::SendResponse {
                task_id: "t1".to_string(),
                status: None,
            },
        )));
        app
    }

    #[test]
    fn renders_echo_and_placeholder() {
        let mut app = app_with_task();
        let text = render_text(&mut app);
        assert!(text.contains("do the thing"));
        assert!(text.contains("Thinking"));
    }

    #[test]
    fn renders_step_headers_from_logs() {
        let mut app = app_with_task();
        app.apply_poller_event(PollerEvent {
            task_id: "t1".to_string(),
            kind: PollerEventKind::Logs(vec![LogEntry::new(
                LogLevel::Info,
                "Executing step 2/20",
            )]),
        });
        let text = render_text(&mut app);
        assert!(text.contains("Executing step 2/20"));
        // The task is still running, so the busy placeholder stays visible.
        assert!(text.contains("Thinking"));
    }

    #[test]
    fn renders_pending_question_banner() {
        let mut app = app_with_task();
        app.pending_question = Some("Proceed with deletion?".to_string());
        let text = render_text(&mut app);
        assert!(text.contains("Question"));
        assert!(text.contains("Proceed with deletion?"));
    }

    #[test]
    fn multi_line_messages_render_every_line() {
        let mut app = app_with_task();
        app.apply_poller_event(PollerEvent {
            task_id: "t1".to_string(),
            kind: PollerEventKind::Logs(vec![LogEntry::new(LogLevel::Info, "line one\nline two")]),
        });
        let text = render_text(&mut app);
        assert!(text.contains("line one"));
        assert!(text.contains("line two"));
    }
}
