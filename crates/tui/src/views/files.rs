use crate::app::{App, FilesFocus};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [todo_area, file_area, path_area] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    render_todo(frame, app, todo_area);
    render_file(frame, app, file_area);
    render_path_entry(frame, app, path_area);
}

fn render_todo(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block()
        .title(Span::styled(
            " Plan (todo.md) ",
            Style::new().fg(Theme::TEXT_SECONDARY),
        ))
        .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.todo {
        Some(ref content) if !content.trim().is_empty() => {
            let lines: Vec<Line> = content
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), todo_line_style(l))))
                .collect();
            frame.render_widget(Paragraph::new(lines), inner);
        }
        _ => {
            let hint = Line::from(Span::styled(
                "No plan yet (r to refresh)",
                Style::new().fg(Theme::TEXT_MUTED),
            ));
            frame.render_widget(Paragraph::new(hint), inner);
        }
    }
}

fn todo_line_style(line: &str) -> Style {
    let trimmed = line.trim_start();
    if trimmed.starts_with("- [x]") || trimmed.starts_with("* [x]") {
        Style::new().fg(Theme::ACCENT_GREEN)
    } else if trimmed.starts_with("- [ ]") || trimmed.starts_with("* [ ]") {
        Style::new().fg(Theme::TEXT_CONTENT)
    } else if trimmed.starts_with('#') {
        Style::new().fg(Theme::TEXT_PRIMARY).bold()
    } else {
        Style::new().fg(Theme::TEXT_SECONDARY)
    }
}

fn render_file(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.file_view {
        Some((ref path, _)) => format!(" {path} "),
        None => " File ".to_string(),
    };
    let block = Theme::block()
        .title(Span::styled(title, Style::new().fg(Theme::TEXT_SECONDARY)))
        .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.file_view {
        Some((_, ref content)) => {
            let lines: Vec<Line> = content
                .lines()
                .map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::new().fg(Theme::TEXT_CONTENT),
                    ))
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), inner);
        }
        None => {
            let hint = Line::from(Span::styled(
                "Press / to open a workspace file by path",
                Style::new().fg(Theme::TEXT_MUTED),
            ));
            frame.render_widget(Paragraph::new(hint), inner);
        }
    }
}

fn render_path_entry(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.files_focus == FilesFocus::PathEntry;
    let block = if active {
        Theme::block_accent()
    } else {
        Theme::block_dim()
    };
    let block = block.title(Span::styled(
        " Path ",
        Style::new().fg(Theme::TEXT_SECONDARY),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        app.file_path_input.clone(),
        Style::new().fg(Theme::TEXT_PRIMARY),
    )];
    if active {
        spans.push(Span::styled("_", Style::new().fg(Theme::ACCENT_BLUE)));
    } else {
        spans = vec![Span::styled(
            "press / to enter a path",
            Style::new().fg(Theme::TEXT_HINT),
        )];
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
