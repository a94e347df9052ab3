//! Home feature view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use taskdeck_core::api::types::{Task, TaskStatus};

use super::state::{HomeMode, InsertField};
use crate::common::ItemOp;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    render_draft_form(app, frame, chunks[0]);
    render_task_list(app, frame, chunks[1]);
}

fn render_draft_form(app: &AppState, frame: &mut Frame, area: Rect) {
    let focus = match &app.home.mode {
        HomeMode::Insert(field) => Some(*field),
        _ => None,
    };

    let title = if app.tasks.task_create.is_running() {
        " New task (adding...) "
    } else {
        " New task "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focus.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        input_line("Task", &app.home.draft_text, focus == Some(InsertField::Text)),
        input_line(
            "Description",
            &app.home.draft_description,
            focus == Some(InsertField::Description),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn input_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label:<12}"), style),
        Span::raw(value.to_string()),
    ])
}

fn render_task_list(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = if app.tasks.task_list.is_running() {
        " Tasks (loading...) "
    } else {
        " Tasks "
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if app.todos.tasks.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No tasks yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .todos
        .tasks
        .iter()
        .map(|task| ListItem::new(task_line(app, task)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.home.selected.min(app.todos.tasks.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_line(app: &AppState, task: &Task) -> Line<'static> {
    let editing = matches!(&app.home.mode, HomeMode::Edit { id, .. } if *id == task.id);
    let text = if let HomeMode::Edit { id, buffer } = &app.home.mode
        && *id == task.id
    {
        format!("{buffer}_")
    } else {
        task.text.clone()
    };

    let (mark, mark_style) = match task.status {
        TaskStatus::Completed => ("[x]", Style::default().fg(Color::Green)),
        TaskStatus::Pending => ("[ ]", Style::default().fg(Color::Yellow)),
    };

    let mut text_style = Style::default();
    if task.status == TaskStatus::Completed && !editing {
        text_style = text_style
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    let mut spans = vec![
        Span::styled(format!("{mark} "), mark_style),
        Span::styled(text, text_style),
    ];
    if !task.description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", task.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(assignee) = &task.assigned_to {
        spans.push(Span::styled(
            format!("  → {}", assignee.display_name()),
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(op) = app.pending.op_for(&task.id) {
        let label = match op {
            ItemOp::Update => "  saving…",
            ItemOp::Delete => "  deleting…",
            ItemOp::Assign => "  assigning…",
        };
        spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}
