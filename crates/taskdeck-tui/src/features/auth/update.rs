//! Auth feature reducer.
//!
//! Key handling for the login/registration form plus result processing
//! for the two auth calls.

use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_core::api::types::{Credentials, RegisterDraft};
use taskdeck_core::session::SessionAction;

use super::state::AuthMode;
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::state::AppState;
use crate::update::{apply_session_action, startup_fetches};

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.auth.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth.focus_prev();
            vec![]
        }
        KeyCode::Left | KeyCode::Right => {
            app.auth.toggle_mode();
            vec![]
        }
        KeyCode::Esc => apply_session_action(app, SessionAction::ClearError),
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => {
            app.auth.field_mut().pop();
            vec![]
        }
        KeyCode::Char(c) => {
            app.auth.field_mut().push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Dispatches the login or registration call, unless one is already in
/// flight.
fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.login.is_running() || app.tasks.register.is_running() {
        return vec![];
    }

    let email = app.auth.email.trim().to_string();
    let password = app.auth.password.clone();

    match app.auth.mode {
        AuthMode::Login => {
            if email.is_empty() || password.is_empty() {
                app.notices.info("Email and password are required");
                return vec![];
            }
            let mut effects = apply_session_action(app, SessionAction::LoginStart);
            let task = app.task_seq.next_id();
            app.tasks.login.on_started(task);
            effects.push(UiEffect::Login {
                task,
                credentials: Credentials { email, password },
            });
            effects
        }
        AuthMode::Register => {
            let username = app.auth.name.trim().to_string();
            if username.is_empty() || email.is_empty() || password.is_empty() {
                app.notices.info("Name, email and password are required");
                return vec![];
            }
            let mut effects = apply_session_action(app, SessionAction::RegisterStart);
            let task = app.task_seq.next_id();
            app.tasks.register.on_started(task);
            effects.push(UiEffect::Register {
                task,
                draft: RegisterDraft {
                    username,
                    email,
                    password,
                },
            });
            effects
        }
    }
}

/// Applies a completed login/registration call.
pub fn handle_result(app: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginFinished { id, result } => {
            if !app.tasks.login.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(response) => {
                    app.notices
                        .success(format!("Welcome back, {}", response.user.name));
                    let mut effects = apply_session_action(
                        app,
                        SessionAction::LoginSuccess {
                            user: response.user,
                            token: response.token,
                        },
                    );
                    app.auth = super::AuthForm::default();
                    effects.extend(startup_fetches(app));
                    effects
                }
                Err(err) => {
                    app.notices.error(err.message.clone());
                    app.auth.clear_password();
                    apply_session_action(app, SessionAction::LoginFailure {
                        message: err.message,
                    })
                }
            }
        }
        AuthUiEvent::RegisterFinished { id, result } => {
            if !app.tasks.register.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(response) => {
                    app.notices
                        .success(format!("Welcome, {}", response.user.name));
                    let mut effects = apply_session_action(
                        app,
                        SessionAction::RegisterSuccess {
                            user: response.user,
                            token: response.token,
                        },
                    );
                    app.auth = super::AuthForm::default();
                    effects.extend(startup_fetches(app));
                    effects
                }
                Err(err) => {
                    app.notices.error(err.message.clone());
                    app.auth.clear_password();
                    apply_session_action(app, SessionAction::RegisterFailure {
                        message: err.message,
                    })
                }
            }
        }
    }
}
