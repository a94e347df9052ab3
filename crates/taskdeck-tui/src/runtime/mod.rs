//! TUI runtime: owns the terminal, runs the event loop, executes
//! effects.
//!
//! This is the Elm-runtime boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Async handlers send `UiEvent`s directly to `inbox_tx`; the runtime
//! drains `inbox_rx` each frame. There are no per-operation receivers,
//! so completions arrive in one ordered stream regardless of which call
//! finished first.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use taskdeck_core::api::ApiClient;
use taskdeck_core::config::Config;
use taskdeck_core::credentials;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while an operation is in flight (spinner animation).
const FRAME_DURATION: Duration = Duration::from_millis(100);

/// Poll duration when idle; longer timeout reduces CPU usage.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop,
/// panic, and Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Template client; each spawned call gets a copy carrying the
    /// session token of the moment it was dispatched.
    api: ApiClient,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime, entering the alternate screen.
    pub fn new(config: Config) -> Result<Self> {
        // Panic hook goes in BEFORE the alternate screen.
        terminal::install_panic_hook();

        let api = ApiClient::new(&config.api_url)?;
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // A rehydrated session starts loading immediately, same as a
        // fresh login.
        if self.state.session.is_authenticated() {
            let effects = update::startup_fetches(&mut self.state);
            self.execute_effects(effects);
        }

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                // Ticks cap the frame rate; input batches into the next
                // draw as well.
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects terminal input, drained inbox completions and ticks.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until the next tick is due unless there is already work.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and routes its completion to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let api = self.api.with_token(self.state.session.token.clone());
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(api).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Login { task, credentials } => {
                self.spawn_effect(move |api| handlers::login(api, task, credentials));
            }
            UiEffect::Register { task, draft } => {
                self.spawn_effect(move |api| handlers::register(api, task, draft));
            }
            UiEffect::FetchTasks { task } => {
                self.spawn_effect(move |api| handlers::fetch_tasks(api, task));
            }
            UiEffect::FetchUsers { task } => {
                self.spawn_effect(move |api| handlers::fetch_users(api, task));
            }
            UiEffect::FetchDashboard { task } => {
                self.spawn_effect(move |api| handlers::fetch_dashboard(api, task));
            }
            UiEffect::CreateTask { task, draft } => {
                self.spawn_effect(move |api| handlers::create_task(api, task, draft));
            }
            UiEffect::UpdateTask { id, patch } => {
                self.spawn_effect(move |api| handlers::update_task(api, id, patch));
            }
            UiEffect::DeleteTask { id } => {
                self.spawn_effect(move |api| handlers::delete_task(api, id));
            }
            UiEffect::AssignTask { task_id, user_id } => {
                self.spawn_effect(move |api| handlers::assign_task(api, task_id, user_id));
            }

            // Credential mirroring is synchronous and best-effort; a
            // failed write only costs the next startup a login.
            UiEffect::PersistCredentials { token, user } => {
                if let Err(e) = credentials::save(&token, &user) {
                    tracing::warn!(error = %e, "failed to persist credentials");
                }
            }
            UiEffect::ClearCredentials => {
                if let Err(e) = credentials::clear() {
                    tracing::warn!(error = %e, "failed to clear credentials");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
