//! Dashboard feature reducer.

use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_core::api::types::{Task, TaskPatch};

use super::state::DashboardColumn;
use crate::common::ItemOp;
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update::fetch_dashboard;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            app.dashboard.column = DashboardColumn::AssignedByMe;
            vec![]
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.dashboard.column = DashboardColumn::AssignedToMe;
            vec![]
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = focused_column(app).len();
            let selected = app.dashboard.selected_mut();
            if *selected + 1 < len {
                *selected += 1;
            }
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let selected = app.dashboard.selected_mut();
            *selected = selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Char('r') => {
            if app.tasks.dashboard.is_running() {
                vec![]
            } else {
                vec![fetch_dashboard(app)]
            }
        }
        _ => vec![],
    }
}

fn focused_column(app: &AppState) -> &[Task] {
    match app.dashboard.column {
        DashboardColumn::AssignedByMe => &app.todos.dashboard.assigned_by_me,
        DashboardColumn::AssignedToMe => &app.todos.dashboard.assigned_to_me,
    }
}

/// Status toggle on the focused dashboard row.
///
/// The server recomputes the dashboard split, so completion of this
/// update triggers a dashboard re-fetch in the main reducer.
fn toggle_selected(app: &mut AppState) -> Vec<UiEffect> {
    let Some(task) = focused_column(app).get(app.dashboard.selected()) else {
        return vec![];
    };
    let id = task.id.clone();
    let next = task.status.toggled();
    if !app.pending.begin(&id, ItemOp::Update) {
        return vec![];
    }
    vec![UiEffect::UpdateTask {
        id,
        patch: TaskPatch::status(next),
    }]
}
