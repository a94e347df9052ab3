//! Application state composition.
//!
//! ```text
//! AppState
//! ├── route: Route                 (effective screen, guard-resolved)
//! ├── session: Session             (auth state container)
//! ├── todos: TodoState             (task collection + dashboard)
//! ├── users: Vec<UserProfile>      (assignment picker data)
//! ├── auth / home / dashboard / assign  (per-screen view state)
//! ├── task_seq + tasks: Tasks      (collection-level async slots)
//! ├── pending: PendingItems        (per-task-id in-flight markers)
//! └── notices: Notices             (ephemeral toasts)
//! ```
//!
//! Only the reducer in [`crate::update`] mutates this; rendering reads
//! it immutably.

use taskdeck_core::api::types::UserProfile;
use taskdeck_core::config::Config;
use taskdeck_core::credentials;
use taskdeck_core::session::{Session, SessionAction, reduce};
use taskdeck_core::todos::TodoState;

use crate::common::{PendingItems, TaskSeq, Tasks};
use crate::features::assign::AssignState;
use crate::features::auth::AuthForm;
use crate::features::dashboard::DashboardState;
use crate::features::home::HomeState;
use crate::notices::Notices;
use crate::routes::{self, Route};

pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Effective route; re-resolved by the guard after every event.
    pub route: Route,
    /// Current session snapshot.
    pub session: Session,
    /// Task collection and dashboard aggregate.
    pub todos: TodoState,
    /// Known users, for the assignment picker.
    pub users: Vec<UserProfile>,
    /// Login/registration form state.
    pub auth: AuthForm,
    /// Task list screen state.
    pub home: HomeState,
    /// Dashboard screen state.
    pub dashboard: DashboardState,
    /// Assignment screen state.
    pub assign: AssignState,
    /// Id generator for spawned operations.
    pub task_seq: TaskSeq,
    /// Collection-level operation slots.
    pub tasks: Tasks,
    /// Per-task-id in-flight markers.
    pub pending: PendingItems,
    /// Ephemeral notifications.
    pub notices: Notices,
    /// Client configuration.
    pub config: Config,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    /// Creates the startup state, rehydrating the session from the
    /// persisted credential store.
    ///
    /// A corrupt credential file self-heals inside the store and lands
    /// here as an anonymous session; the guard then picks the Auth
    /// route.
    pub fn new(config: Config) -> Self {
        let stored = credentials::load();
        let (token, user) = match stored {
            Some(stored) => (Some(stored.token), Some(stored.user)),
            None => (None, None),
        };
        let (session, _) = reduce(
            &Session::anonymous(),
            SessionAction::RestoreAuth { token, user },
        );
        Self::with_session(config, session)
    }

    /// Creates state around an existing session without touching disk.
    pub fn with_session(config: Config, session: Session) -> Self {
        let route = routes::resolve(Route::Home, &session);
        Self {
            should_quit: false,
            route,
            session,
            todos: TodoState::new(),
            users: Vec::new(),
            auth: AuthForm::default(),
            home: HomeState::default(),
            dashboard: DashboardState::default(),
            assign: AssignState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            pending: PendingItems::default(),
            notices: Notices::default(),
            config,
            spinner_frame: 0,
        }
    }
}
