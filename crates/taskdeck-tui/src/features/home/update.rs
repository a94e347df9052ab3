//! Home feature reducer (task list keys).

use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_core::api::types::{TaskDraft, TaskPatch, TaskStatus};

use super::state::{HomeMode, InsertField};
use crate::common::ItemOp;
use crate::effects::UiEffect;
use crate::state::AppState;
use crate::update::fetch_tasks;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match app.home.mode.clone() {
        HomeMode::List => handle_list_key(app, key),
        HomeMode::Insert(field) => handle_insert_key(app, key, field),
        HomeMode::Edit { id, buffer } => handle_edit_key(app, key, id, buffer),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.home.selected + 1 < app.todos.tasks.len() {
                app.home.selected += 1;
            }
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.home.selected = app.home.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Char('a') => {
            app.home.mode = HomeMode::Insert(InsertField::Text);
            vec![]
        }
        KeyCode::Char('e') => {
            if let Some(task) = app.todos.tasks.get(app.home.selected)
                && !app.pending.is_pending(&task.id)
            {
                app.home.mode = HomeMode::Edit {
                    id: task.id.clone(),
                    buffer: task.text.clone(),
                };
            }
            vec![]
        }
        KeyCode::Char(' ') => toggle_selected(app),
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('r') => {
            if app.tasks.task_list.is_running() {
                vec![]
            } else {
                vec![fetch_tasks(app)]
            }
        }
        _ => vec![],
    }
}

/// Status toggle on the selected task, guarded by the per-id marker.
fn toggle_selected(app: &mut AppState) -> Vec<UiEffect> {
    let Some(task) = app.todos.tasks.get(app.home.selected) else {
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

fn delete_selected(app: &mut AppState) -> Vec<UiEffect> {
    let Some(task) = app.todos.tasks.get(app.home.selected) else {
        return vec![];
    };
    let id = task.id.clone();
    if !app.pending.begin(&id, ItemOp::Delete) {
        return vec![];
    }
    vec![UiEffect::DeleteTask { id }]
}

fn handle_insert_key(app: &mut AppState, key: KeyEvent, field: InsertField) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.home.mode = HomeMode::List;
            vec![]
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.home.mode = HomeMode::Insert(match field {
                InsertField::Text => InsertField::Description,
                InsertField::Description => InsertField::Text,
            });
            vec![]
        }
        KeyCode::Enter => submit_draft(app),
        KeyCode::Backspace => {
            draft_field(app, field).pop();
            vec![]
        }
        KeyCode::Char(c) => {
            draft_field(app, field).push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn draft_field(app: &mut AppState, field: InsertField) -> &mut String {
    match field {
        InsertField::Text => &mut app.home.draft_text,
        InsertField::Description => &mut app.home.draft_description,
    }
}

fn submit_draft(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.task_create.is_running() {
        return vec![];
    }
    if app.home.draft_text.trim().is_empty() {
        // Mirrors the client-side precondition: no call is made.
        app.notices.info("Task text cannot be empty");
        return vec![];
    }
    let task = app.task_seq.next_id();
    app.tasks.task_create.on_started(task);
    vec![UiEffect::CreateTask {
        task,
        draft: TaskDraft {
            text: app.home.draft_text.trim().to_string(),
            description: app.home.draft_description.trim().to_string(),
            status: TaskStatus::Pending,
        },
    }]
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent, id: String, mut buffer: String) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.home.mode = HomeMode::List;
            vec![]
        }
        KeyCode::Enter => {
            if buffer.trim().is_empty() {
                app.notices.info("Task text cannot be empty");
                return vec![];
            }
            // The marker must be acquired before leaving edit mode so a
            // busy task keeps the buffer instead of discarding the edit.
            if !app.pending.begin(&id, ItemOp::Update) {
                app.notices.info("Task is busy, try again in a moment");
                return vec![];
            }
            app.home.mode = HomeMode::List;
            vec![UiEffect::UpdateTask {
                id,
                patch: TaskPatch {
                    text: Some(buffer.trim().to_string()),
                    ..TaskPatch::default()
                },
            }]
        }
        KeyCode::Backspace => {
            buffer.pop();
            app.home.mode = HomeMode::Edit { id, buffer };
            vec![]
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            app.home.mode = HomeMode::Edit { id, buffer };
            vec![]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use taskdeck_core::api::types::Task;
    use taskdeck_core::config::Config;
    use taskdeck_core::session::Session;

    use super::*;

    fn app_with_task(id: &str) -> AppState {
        let mut app = AppState::with_session(Config::default(), Session::anonymous());
        app.todos.replace_all(vec![Task {
            id: id.to_string(),
            text: "old text".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            created_at: None,
            owner: None,
            assigned_to: None,
            assigned_by: None,
        }]);
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edit_submit_dispatches_text_patch() {
        let mut app = app_with_task("t1");
        app.home.mode = HomeMode::Edit {
            id: "t1".to_string(),
            buffer: "new text".to_string(),
        };

        let effects = handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.home.mode, HomeMode::List);
        assert!(app.pending.is_pending("t1"));
        assert!(matches!(
            &effects[..],
            [UiEffect::UpdateTask { id, patch }]
                if id == "t1" && patch.text.as_deref() == Some("new text")
        ));
    }

    #[test]
    fn edit_submit_on_a_busy_task_keeps_the_buffer() {
        let mut app = app_with_task("t1");
        app.pending.begin("t1", ItemOp::Delete);
        app.home.mode = HomeMode::Edit {
            id: "t1".to_string(),
            buffer: "new text".to_string(),
        };

        let effects = handle_key(&mut app, press(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(
            app.home.mode,
            HomeMode::Edit {
                id: "t1".to_string(),
                buffer: "new text".to_string(),
            }
        );
        assert_eq!(app.pending.op_for("t1"), Some(ItemOp::Delete));
        assert!(
            app.notices
                .latest()
                .is_some_and(|notice| notice.text.contains("busy"))
        );
    }
}
