//! Dashboard feature view.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use taskdeck_core::api::types::{Task, TaskStatus};

use super::state::DashboardColumn;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_column(
        app,
        frame,
        columns[0],
        " Assigned by me ",
        &app.todos.dashboard.assigned_by_me,
        DashboardColumn::AssignedByMe,
        app.dashboard.selected_by_me,
        true,
    );
    render_column(
        app,
        frame,
        columns[1],
        " Assigned to me ",
        &app.todos.dashboard.assigned_to_me,
        DashboardColumn::AssignedToMe,
        app.dashboard.selected_to_me,
        false,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_column(
    app: &AppState,
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tasks: &[Task],
    column: DashboardColumn,
    selected: usize,
    show_assignee: bool,
) {
    let focused = app.dashboard.column == column;
    let title = if app.tasks.dashboard.is_running() {
        format!("{title}(loading...) ")
    } else {
        title.to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if tasks.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("Nothing here.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| ListItem::new(row_line(app, task, now, show_assignee)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });

    let mut state = ListState::default();
    state.select(Some(selected.min(tasks.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn row_line(app: &AppState, task: &Task, now: DateTime<Utc>, show_assignee: bool) -> Line<'static> {
    let (mark, mark_style) = match task.status {
        TaskStatus::Completed => ("[x]", Style::default().fg(Color::Green)),
        TaskStatus::Pending => ("[ ]", Style::default().fg(Color::Yellow)),
    };

    let mut text_style = Style::default();
    if task.status == TaskStatus::Completed {
        text_style = text_style
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    let mut spans = vec![
        Span::styled(format!("{mark} "), mark_style),
        Span::styled(task.text.clone(), text_style),
    ];

    let counterpart = if show_assignee {
        task.assigned_to.as_ref()
    } else {
        task.assigned_by.as_ref()
    };
    if let Some(user) = counterpart {
        spans.push(Span::styled(
            format!("  {}", user.display_name()),
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(created) = task.created_at {
        spans.push(Span::styled(
            format!("  {}", relative_date(created, now)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.pending.is_pending(&task.id) {
        spans.push(Span::styled("  …", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

/// Human-friendly creation date relative to `now`.
fn relative_date(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now.date_naive() - created.date_naive()).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => created.format("%Y-%m-%d").to_string(),
    }
}
