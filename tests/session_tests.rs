mod common;

use common::{Call, FakeApi, Store};
use psi_booking::api::{LoginRequest, RegisterRequest};
use psi_booking::error::ApiError;
use psi_booking::session::{self, AuthOp, SessionAction, SessionStatus};

fn signed_up(api: &FakeApi) {
    api.state.borrow_mut().password = "secret1".into();
}

fn credentials(password: &str) -> LoginRequest {
    LoginRequest {
        email: "ana@example.com".into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn test_refresh_without_session_is_silent_failure() {
    let api = FakeApi::default();
    let store = Store::default();

    let ok = session::refresh_current_user(&api, &|a| store.dispatch(a)).await;

    assert!(!ok);
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Failed);
    assert!(s.user.is_none());
    assert!(s.error.is_none(), "identity check must not surface an error");
    assert_eq!(
        store.log.borrow()[0],
        SessionAction::Started(AuthOp::FetchCurrentUser)
    );
}

#[tokio::test]
async fn test_login_then_identity_loaded() {
    let api = FakeApi::default();
    signed_up(&api);
    let store = Store::default();

    let ok = session::log_in(&api, &credentials("secret1"), &|a| store.dispatch(a)).await;

    assert!(ok);
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Succeeded);
    assert_eq!(s.user.unwrap().email, "ana@example.com");
    assert_eq!(
        api.calls(),
        vec![Call::Login("ana@example.com".into()), Call::CurrentUser]
    );
}

#[tokio::test]
async fn test_bad_password_stops_before_identity_check() {
    let api = FakeApi::default();
    signed_up(&api);
    let store = Store::default();

    let ok = session::log_in(&api, &credentials("wrong-one"), &|a| store.dispatch(a)).await;

    assert!(!ok);
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Failed);
    assert_eq!(s.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(api.calls(), vec![Call::Login("ana@example.com".into())]);
}

#[tokio::test]
async fn test_register_logs_in_and_loads_identity() {
    let api = FakeApi::default();
    let store = Store::default();
    let form = RegisterRequest {
        first_name: "Ana".into(),
        last_name: "Rossi".into(),
        email: "ana@example.com".into(),
        password: "secret1".into(),
    };

    let ok = session::register(&api, &form, &|a| store.dispatch(a)).await;

    assert!(ok);
    assert_eq!(
        api.calls(),
        vec![
            Call::Register("ana@example.com".into()),
            Call::Login("ana@example.com".into()),
            Call::CurrentUser,
        ]
    );
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Succeeded);
    assert_eq!(s.user.unwrap().full_name(), "Ana Rossi");
}

#[tokio::test]
async fn test_register_conflict_reports_message() {
    let api = FakeApi::default();
    api.state.borrow_mut().register_error = Some(ApiError::Status {
        status: 409,
        message: "Email already registered".into(),
    });
    let store = Store::default();
    let form = RegisterRequest {
        first_name: "Ana".into(),
        last_name: "Rossi".into(),
        email: "ana@example.com".into(),
        password: "secret1".into(),
    };

    let ok = session::register(&api, &form, &|a| store.dispatch(a)).await;

    assert!(!ok);
    assert_eq!(api.calls(), vec![Call::Register("ana@example.com".into())]);
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Email already registered")
    );
}

#[tokio::test]
async fn test_logout_clears_identity() {
    let api = FakeApi::default();
    signed_up(&api);
    let store = Store::default();
    session::log_in(&api, &credentials("secret1"), &|a| store.dispatch(a)).await;
    assert!(store.snapshot().is_signed_in());

    let ok = session::log_out(&api, &|a| store.dispatch(a)).await;

    assert!(ok);
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Succeeded);
    assert!(s.user.is_none());

    // A later identity check agrees with the server
    session::refresh_current_user(&api, &|a| store.dispatch(a)).await;
    assert_eq!(store.snapshot().status, SessionStatus::Failed);
}

#[tokio::test]
async fn test_failed_logout_keeps_user() {
    let api = FakeApi::default();
    signed_up(&api);
    let store = Store::default();
    session::log_in(&api, &credentials("secret1"), &|a| store.dispatch(a)).await;
    api.state.borrow_mut().logout_error = Some(ApiError::Network("Failed to fetch".into()));

    let ok = session::log_out(&api, &|a| store.dispatch(a)).await;

    assert!(!ok);
    let s = store.snapshot();
    assert_eq!(s.status, SessionStatus::Failed);
    assert!(s.user.is_some());
    assert_eq!(s.error.as_deref(), Some("Network error: Failed to fetch"));
}

#[tokio::test]
async fn test_logout_retry_leaves_no_stale_error() {
    let api = FakeApi::default();
    signed_up(&api);
    let store = Store::default();
    session::log_in(&api, &credentials("secret1"), &|a| store.dispatch(a)).await;

    api.state.borrow_mut().logout_error = Some(ApiError::Network("Failed to fetch".into()));
    assert!(!session::log_out(&api, &|a| store.dispatch(a)).await);
    assert_eq!(
        store.snapshot().logout_error(),
        Some("Network error: Failed to fetch")
    );

    api.state.borrow_mut().logout_error = None;
    assert!(session::log_out(&api, &|a| store.dispatch(a)).await);

    let s = store.snapshot();
    assert!(s.user.is_none());
    assert_eq!(s.error, None, "login form would show a stale logout error");
}
