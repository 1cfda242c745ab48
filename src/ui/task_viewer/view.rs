use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::dialog::{DialogController, DialogState};
use crate::task::Task;

use super::app::{AppState, Focus};

const PLACEHOLDER_ROWS: usize = 50;
const HELP_KEY_WIDTH: usize = 14;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();

    if let Some(message) = app.session.load_error() {
        render_load_error(frame, area, message);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_search(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.session.dialog().is_open() {
        render_dialog_modal(frame, area, app.session.dialog());
    }
}

fn render_load_error(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "q quit",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_search(frame: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Search;
    let term = app.session.raw_term();
    let mut spans = vec![Span::styled("search: ", Style::default().fg(COLOR_MUTED))];
    if term.is_empty() && !focused {
        spans.push(Span::styled(
            "Search todos...",
            Style::default().fg(COLOR_MUTED_DARK),
        ));
    } else {
        spans.push(Span::styled(term.to_string(), Style::default().fg(COLOR_TEXT)));
    }
    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().bg(COLOR_TEXT).fg(COLOR_BG_MUTED),
        ));
    }
    if app.session.search_pending() {
        spans.push(Span::styled("  ...", Style::default().fg(COLOR_MUTED_DARK)));
    }

    let border = if focused { COLOR_ACCENT } else { COLOR_BORDER_LIST };
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Todo list")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let list_height = area.height.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if app.show_help {
        lines.extend(build_help_lines(content_width));
        lines.push(Line::from(""));
    }

    if app.session.loading() {
        for _ in 0..PLACEHOLDER_ROWS.min(list_height) {
            lines.push(Line::from(Span::styled(
                "░".repeat(content_width.min(48)),
                Style::default().fg(COLOR_BG_MUTED),
            )));
        }
    } else {
        let visible = app.session.visible_indices();
        if visible.is_empty() {
            let text = if app.session.settled_term().is_empty() {
                "No tasks"
            } else {
                "No matches"
            };
            lines.push(Line::from(text));
        } else {
            let height = list_height.saturating_sub(lines.len());
            let selected = app.session.selected_index();
            let selected_pos =
                selected.and_then(|idx| visible.iter().position(|candidate| *candidate == idx));
            let (start, end) = list_window(visible.len(), selected_pos, height);
            for idx in &visible[start..end] {
                if let Some(task) = app.session.tasks().get(*idx) {
                    lines.push(render_list_row(task, selected == Some(*idx), content_width));
                }
            }
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Tasks")
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}

fn render_list_row(task: &Task, selected: bool, width: usize) -> Line<'static> {
    let (mark, mark_color) = if task.completed {
        ("[x] ", COLOR_SUCCESS)
    } else {
        ("[ ] ", COLOR_MUTED)
    };
    let mut title_style = Style::default().fg(COLOR_TEXT);
    if task.completed {
        title_style = title_style
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    let title = truncate_text(&task.title, width.saturating_sub(mark.len()));
    let mut line = Line::from(vec![
        Span::styled(mark, Style::default().fg(mark_color)),
        Span::styled(title, title_style),
    ]);
    if selected {
        line = line.style(Style::default().bg(COLOR_BG_MUTED));
    }
    line
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint_line = Line::from(Span::styled(
        app.footer_hint(),
        Style::default().fg(COLOR_INFO),
    ));
    let summary = app.session.summary();
    let status = if app.session.loading() {
        format!("loading from {}", app.source_label)
    } else {
        format!(
            "total: {}  completed: {}  shown: {}",
            summary.total, summary.completed, summary.visible
        )
    };
    let counts_line = Line::from(Span::styled(status, Style::default().fg(COLOR_ACCENT)));
    let widget = Paragraph::new(vec![hint_line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_dialog_modal(frame: &mut Frame, area: Rect, dialog: &DialogController) {
    let (title, prompt, submit_label) = match dialog.state() {
        DialogState::Editing(_) => ("Edit Todo", "Update your todo item.", "Update"),
        _ => (
            "Create New Todo",
            "Enter the task for your new todo item.",
            "Create",
        ),
    };
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 9, area);
    frame.render_widget(Clear, modal);

    let field_width = (content_width as usize).saturating_sub(6);
    let submit_style = if dialog.can_submit() {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_MUTED_DARK)
    };
    let lines = vec![
        Line::from(Span::styled(prompt, Style::default().fg(COLOR_MUTED))),
        Line::from(""),
        Line::from(vec![
            Span::styled("To do task: ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                truncate_tail(dialog.title(), field_width.saturating_sub(12)),
                Style::default().fg(COLOR_TEXT),
            ),
            Span::styled(" ", Style::default().bg(COLOR_TEXT)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("esc Cancel", Style::default().fg(COLOR_MUTED)),
            Span::raw("    "),
            Span::styled(format!("enter {submit_label}"), submit_style),
        ]),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, modal);
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    let entries = [
        ("/", "focus search"),
        ("esc", "clear search / quit"),
        ("a", "add task"),
        ("enter e", "edit title"),
        ("space x", "toggle completed"),
        ("d", "delete task"),
        ("j k", "move"),
        ("q", "quit"),
    ];
    entries
        .iter()
        .map(|(keys, desc)| help_line(keys, desc, width))
        .collect()
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH);
    Line::from(vec![
        Span::styled(
            format!("{keys:<width$}", width = HELP_KEY_WIDTH),
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(
            truncate_text(desc, desc_width),
            Style::default().fg(COLOR_MUTED),
        ),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

/// Keep the end of the text visible, for the field being typed into.
fn truncate_tail(value: &str, max: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    chars[chars.len() - max..].iter().collect()
}
