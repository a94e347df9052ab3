//! Assignment feature reducer.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::AssignPane;
use crate::common::ItemOp;
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update::{fetch_tasks, fetch_users};

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.assign.pane = match app.assign.pane {
                AssignPane::Tasks => AssignPane::Users,
                AssignPane::Users => AssignPane::Tasks,
            };
            vec![]
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.assign.pane = AssignPane::Tasks;
            vec![]
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.assign.pane = AssignPane::Users;
            vec![]
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_selection(app, 1);
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_selection(app, -1);
            vec![]
        }
        KeyCode::Enter => confirm(app),
        KeyCode::Esc => {
            app.assign.chosen_task = None;
            vec![]
        }
        KeyCode::Char('r') => refresh(app),
        _ => vec![],
    }
}

fn move_selection(app: &mut AppState, delta: i64) {
    let (selected, len) = match app.assign.pane {
        AssignPane::Tasks => (&mut app.assign.selected_task, app.todos.tasks.len()),
        AssignPane::Users => (&mut app.assign.selected_user, app.users.len()),
    };
    if delta > 0 {
        if *selected + 1 < len {
            *selected += 1;
        }
    } else {
        *selected = selected.saturating_sub(1);
    }
}

/// Enter picks a task in the task pane and fires the assignment in the
/// user pane.
fn confirm(app: &mut AppState) -> Vec<UiEffect> {
    match app.assign.pane {
        AssignPane::Tasks => {
            if let Some(task) = app.todos.tasks.get(app.assign.selected_task) {
                app.assign.chosen_task = Some(task.id.clone());
                app.assign.pane = AssignPane::Users;
            }
            vec![]
        }
        AssignPane::Users => {
            let Some(task_id) = app.assign.chosen_task.clone() else {
                app.notices.info("Select a task to assign first");
                return vec![];
            };
            let Some(user) = app.users.get(app.assign.selected_user) else {
                app.notices.info("Select a user to assign to");
                return vec![];
            };
            if !app.pending.begin(&task_id, ItemOp::Assign) {
                return vec![];
            }
            vec![UiEffect::AssignTask {
                task_id,
                user_id: user.id.clone(),
            }]
        }
    }
}

fn refresh(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if !app.tasks.task_list.is_running() {
        effects.push(fetch_tasks(app));
    }
    if !app.tasks.user_list.is_running() {
        effects.push(fetch_users(app));
    }
    effects
}
