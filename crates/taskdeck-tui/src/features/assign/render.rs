//! Assignment feature view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::state::AssignPane;
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_tasks(app, frame, panes[0]);
    render_users(app, frame, panes[1]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn render_tasks(app: &AppState, frame: &mut Frame, area: Rect) {
    let focused = app.assign.pane == AssignPane::Tasks;
    let block = pane_block(" Tasks ".to_string(), focused);

    if app.todos.tasks.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No tasks to assign.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .todos
        .tasks
        .iter()
        .map(|task| {
            let chosen = app.assign.chosen_task.as_deref() == Some(task.id.as_str());
            let marker = if chosen { "◆ " } else { "  " };
            let mut spans = vec![
                Span::styled(
                    marker,
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(task.text.clone()),
            ];
            if let Some(assignee) = &task.assigned_to {
                spans.push(Span::styled(
                    format!("  → {}", assignee.display_name()),
                    Style::default().fg(Color::Magenta),
                ));
            }
            if app.pending.is_pending(&task.id) {
                spans.push(Span::styled("  …", Style::default().fg(Color::Yellow)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });

    let mut state = ListState::default();
    state.select(Some(app.assign.selected_task.min(app.todos.tasks.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_users(app: &AppState, frame: &mut Frame, area: Rect) {
    let focused = app.assign.pane == AssignPane::Users;
    let title = if app.tasks.user_list.is_running() {
        " Users (loading...) ".to_string()
    } else {
        " Users ".to_string()
    };
    let block = pane_block(title, focused);

    if app.users.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("No other users found.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .users
        .iter()
        .map(|user| {
            ListItem::new(Line::from(vec![
                Span::raw(user.name.clone()),
                Span::styled(
                    format!("  {}", user.email),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });

    let mut state = ListState::default();
    state.select(Some(app.assign.selected_user.min(app.users.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
