//! Auth state container.
//!
//! The session is an immutable snapshot reduced by [`reduce`]; the
//! reducer performs no I/O and instead returns [`SessionEffect`]s that
//! the caller mirrors into the persisted credential store. This keeps
//! every transition testable without a storage stub.

use serde::{Deserialize, Serialize};

use crate::api::types::UserProfile;

/// Authentication phase. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthPhase {
    /// No session; public routes only.
    Anonymous,
    /// A login or registration call is in flight.
    Authenticating,
    /// `user` and `token` are both present.
    Authenticated,
    /// The last auth attempt failed; `error` carries the message.
    Failed,
}

/// Current session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub phase: AuthPhase,
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    /// A fresh anonymous session.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            phase: AuthPhase::Anonymous,
            error: None,
        }
    }

    /// True iff the session holds both a user and a token.
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }
}

/// Session transitions.
#[derive(Debug, Clone)]
pub enum SessionAction {
    LoginStart,
    RegisterStart,
    LoginSuccess { user: UserProfile, token: String },
    RegisterSuccess { user: UserProfile, token: String },
    LoginFailure { message: String },
    RegisterFailure { message: String },
    Logout,
    /// Startup rehydration from the credential store. A no-op unless
    /// both fields are usable.
    RestoreAuth {
        token: Option<String>,
        user: Option<UserProfile>,
    },
    ClearError,
}

/// Storage side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    PersistCredentials { token: String, user: UserProfile },
    ClearCredentials,
}

/// Produces the next session snapshot and any storage effects.
pub fn reduce(session: &Session, action: SessionAction) -> (Session, Vec<SessionEffect>) {
    match action {
        SessionAction::LoginStart | SessionAction::RegisterStart => (
            Session {
                user: None,
                token: None,
                phase: AuthPhase::Authenticating,
                error: None,
            },
            vec![],
        ),
        SessionAction::LoginSuccess { user, token }
        | SessionAction::RegisterSuccess { user, token } => (
            Session {
                user: Some(user.clone()),
                token: Some(token.clone()),
                phase: AuthPhase::Authenticated,
                error: None,
            },
            vec![SessionEffect::PersistCredentials { token, user }],
        ),
        SessionAction::LoginFailure { message } | SessionAction::RegisterFailure { message } => (
            Session {
                user: None,
                token: None,
                phase: AuthPhase::Failed,
                error: Some(message),
            },
            vec![SessionEffect::ClearCredentials],
        ),
        SessionAction::Logout => (
            Session::anonymous(),
            vec![SessionEffect::ClearCredentials],
        ),
        SessionAction::RestoreAuth { token, user } => match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => (
                Session {
                    user: Some(user),
                    token: Some(token),
                    phase: AuthPhase::Authenticated,
                    error: None,
                },
                vec![],
            ),
            _ => (session.clone(), vec![]),
        },
        SessionAction::ClearError => (
            Session {
                error: None,
                ..session.clone()
            },
            vec![],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "A".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    fn assert_invariant(session: &Session) {
        let both = session.user.is_some() && session.token.is_some();
        assert_eq!(session.is_authenticated(), both);
    }

    #[test]
    fn login_start_clears_prior_error() {
        let failed = Session {
            phase: AuthPhase::Failed,
            error: Some("bad password".to_string()),
            ..Session::anonymous()
        };
        let (next, effects) = reduce(&failed, SessionAction::LoginStart);
        assert_eq!(next.phase, AuthPhase::Authenticating);
        assert!(next.error.is_none());
        assert!(effects.is_empty());
        assert_invariant(&next);
    }

    #[test]
    fn login_success_persists_credentials() {
        let (next, effects) = reduce(
            &Session::anonymous(),
            SessionAction::LoginSuccess {
                user: profile(),
                token: "tok1".to_string(),
            },
        );
        assert!(next.is_authenticated());
        assert_eq!(next.token.as_deref(), Some("tok1"));
        assert_eq!(
            effects,
            vec![SessionEffect::PersistCredentials {
                token: "tok1".to_string(),
                user: profile(),
            }]
        );
        assert_invariant(&next);
    }

    #[test]
    fn login_failure_clears_credentials_and_records_message() {
        let (next, effects) = reduce(
            &Session::anonymous(),
            SessionAction::LoginFailure {
                message: "invalid credentials".to_string(),
            },
        );
        assert_eq!(next.phase, AuthPhase::Failed);
        assert_eq!(next.error.as_deref(), Some("invalid credentials"));
        assert_eq!(effects, vec![SessionEffect::ClearCredentials]);
        assert_invariant(&next);
    }

    #[test]
    fn logout_resets_to_anonymous() {
        let (authed, _) = reduce(
            &Session::anonymous(),
            SessionAction::LoginSuccess {
                user: profile(),
                token: "tok1".to_string(),
            },
        );
        let (next, effects) = reduce(&authed, SessionAction::Logout);
        assert_eq!(next, Session::anonymous());
        assert_eq!(effects, vec![SessionEffect::ClearCredentials]);
    }

    #[test]
    fn restore_requires_both_fields() {
        let anon = Session::anonymous();

        let (next, effects) = reduce(
            &anon,
            SessionAction::RestoreAuth {
                token: Some("tok1".to_string()),
                user: None,
            },
        );
        assert_eq!(next, anon);
        assert!(effects.is_empty());

        let (next, _) = reduce(
            &anon,
            SessionAction::RestoreAuth {
                token: Some(String::new()),
                user: Some(profile()),
            },
        );
        assert_eq!(next, anon);

        let (next, effects) = reduce(
            &anon,
            SessionAction::RestoreAuth {
                token: Some("tok1".to_string()),
                user: Some(profile()),
            },
        );
        assert!(next.is_authenticated());
        assert!(effects.is_empty());
        assert_invariant(&next);
    }

    #[test]
    fn clear_error_keeps_everything_else() {
        let failed = Session {
            phase: AuthPhase::Failed,
            error: Some("nope".to_string()),
            ..Session::anonymous()
        };
        let (next, effects) = reduce(&failed, SessionAction::ClearError);
        assert_eq!(next.phase, AuthPhase::Failed);
        assert!(next.error.is_none());
        assert!(effects.is_empty());
    }

    /// A successful login mirrored to a real temp-dir store rehydrates
    /// into the same authenticated session.
    #[test]
    fn login_then_rehydrate_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let (authed, effects) = reduce(
            &Session::anonymous(),
            SessionAction::LoginSuccess {
                user: profile(),
                token: "tok1".to_string(),
            },
        );
        for effect in effects {
            match effect {
                SessionEffect::PersistCredentials { token, user } => {
                    crate::credentials::save_to(&path, &token, &user).unwrap();
                }
                SessionEffect::ClearCredentials => {
                    crate::credentials::clear_at(&path).unwrap();
                }
            }
        }

        let stored = crate::credentials::load_from(&path).unwrap();
        let (restored, _) = reduce(
            &Session::anonymous(),
            SessionAction::RestoreAuth {
                token: Some(stored.token),
                user: Some(stored.user),
            },
        );
        assert_eq!(restored.user, authed.user);
        assert_eq!(restored.token, authed.token);
        assert!(restored.is_authenticated());
    }
}
