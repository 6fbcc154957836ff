//! Session state: who is signed in and where the last auth operation stands.
//!
//! [`Session::reduce`] is the only way the state changes. The async drivers
//! below run an operation against a [`BookingApi`] and report progress
//! through a `dispatch` callback, so the same code runs against the reactive
//! store in the app and a plain `RefCell` in tests.

use tracing::{debug, info, warn};

use crate::api::{BookingApi, LoginRequest, RegisterRequest, User};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOp {
    FetchCurrentUser,
    Login,
    Register,
    Logout,
}

impl AuthOp {
    /// Shown when the server gives no message. `None` for operations whose
    /// failure is not reported to the user.
    fn fallback_message(self) -> Option<&'static str> {
        match self {
            // Not being signed in is a normal state
            AuthOp::FetchCurrentUser => None,
            AuthOp::Login => Some("Login failed"),
            AuthOp::Register => Some("Registration failed"),
            AuthOp::Logout => Some("Logout failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Started(AuthOp),
    CurrentUserLoaded(User),
    LoggedIn,
    Registered,
    LoggedOut,
    Rejected { op: AuthOp, error: ApiError },
    ClearError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub status: SessionStatus,
    pub error: Option<String>,
}

impl Session {
    pub fn reduce(&mut self, action: SessionAction) {
        match action {
            SessionAction::Started(op) => {
                self.status = SessionStatus::Loading;
                if op.fallback_message().is_some() {
                    self.error = None;
                }
            }
            SessionAction::CurrentUserLoaded(user) => {
                self.status = SessionStatus::Succeeded;
                self.user = Some(user);
            }
            SessionAction::LoggedIn | SessionAction::Registered => {
                self.status = SessionStatus::Succeeded;
            }
            SessionAction::LoggedOut => {
                self.user = None;
                self.status = SessionStatus::Succeeded;
                self.error = None;
            }
            SessionAction::Rejected { op, error } => {
                self.status = SessionStatus::Failed;
                match op.fallback_message() {
                    Some(fallback) => self.error = Some(error.message_or(fallback)),
                    None => self.user = None,
                }
            }
            SessionAction::ClearError => {
                self.error = None;
            }
        }
    }

    /// The initial identity check has resolved one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Succeeded | SessionStatus::Failed
        )
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The error from a logout that left the user signed in.
    pub fn logout_error(&self) -> Option<&str> {
        if self.status == SessionStatus::Failed && self.is_signed_in() {
            self.error.as_deref()
        } else {
            None
        }
    }
}

// -- Drivers --

pub async fn refresh_current_user<A, D>(api: &A, dispatch: &D) -> bool
where
    A: BookingApi,
    D: Fn(SessionAction),
{
    dispatch(SessionAction::Started(AuthOp::FetchCurrentUser));
    match api.current_user().await {
        Ok(user) => {
            debug!("Signed in as {}", user.email);
            dispatch(SessionAction::CurrentUserLoaded(user));
            true
        }
        Err(error) => {
            if error.is_unauthenticated() {
                debug!("No active session");
            } else {
                warn!("Identity check failed: {}", error);
            }
            dispatch(SessionAction::Rejected {
                op: AuthOp::FetchCurrentUser,
                error,
            });
            false
        }
    }
}

/// Log in, then load the identity. Returns whether the login itself succeeded.
pub async fn log_in<A, D>(api: &A, credentials: &LoginRequest, dispatch: &D) -> bool
where
    A: BookingApi,
    D: Fn(SessionAction),
{
    if !log_in_only(api, credentials, dispatch).await {
        return false;
    }
    refresh_current_user(api, dispatch).await;
    true
}

/// Register, log in with the same credentials, then load the identity.
/// Stops at the first failing step.
pub async fn register<A, D>(api: &A, form: &RegisterRequest, dispatch: &D) -> bool
where
    A: BookingApi,
    D: Fn(SessionAction),
{
    dispatch(SessionAction::Started(AuthOp::Register));
    if let Err(error) = api.register(form).await {
        info!("Registration rejected: {}", error);
        dispatch(SessionAction::Rejected {
            op: AuthOp::Register,
            error,
        });
        return false;
    }
    dispatch(SessionAction::Registered);
    info!("Registered {}", form.email);

    log_in(api, &form.credentials(), dispatch).await
}

pub async fn log_out<A, D>(api: &A, dispatch: &D) -> bool
where
    A: BookingApi,
    D: Fn(SessionAction),
{
    dispatch(SessionAction::Started(AuthOp::Logout));
    match api.logout().await {
        Ok(()) => {
            info!("Logged out");
            dispatch(SessionAction::LoggedOut);
            true
        }
        Err(error) => {
            warn!("Logout failed: {}", error);
            dispatch(SessionAction::Rejected {
                op: AuthOp::Logout,
                error,
            });
            false
        }
    }
}

async fn log_in_only<A, D>(api: &A, credentials: &LoginRequest, dispatch: &D) -> bool
where
    A: BookingApi,
    D: Fn(SessionAction),
{
    dispatch(SessionAction::Started(AuthOp::Login));
    match api.login(credentials).await {
        Ok(()) => {
            info!("Logged in {}", credentials.email);
            dispatch(SessionAction::LoggedIn);
            true
        }
        Err(error) => {
            info!("Login rejected: {}", error);
            dispatch(SessionAction::Rejected {
                op: AuthOp::Login,
                error,
            });
            false
        }
    }
}
