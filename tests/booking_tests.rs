mod common;

use common::{date, slot, Call, FakeApi, Store};
use psi_booking::api::{BookingApi, LoginRequest};
use psi_booking::booking::{self, BookingFlow, SlotClick};
use psi_booking::error::ApiError;
use psi_booking::schedule::WeekCursor;
use psi_booking::session;

const PRO: &str = "pro-1";

/// A signed-in user and a professional with three open slots in the week of 2024-06-03.
async fn signed_in_api() -> FakeApi {
    let api = FakeApi::default();
    {
        let mut state = api.state.borrow_mut();
        state.password = "secret1".into();
        state.open_slots = vec![
            slot("2024-06-03T09:00:00Z"),
            slot("2024-06-03T10:00:00Z"),
            slot("2024-06-05T14:00:00Z"),
            slot("2024-06-11T09:00:00Z"),
        ];
    }
    let store = Store::default();
    let creds = LoginRequest {
        email: "ana@example.com".into(),
        password: "secret1".into(),
    };
    assert!(session::log_in(&api, &creds, &|a| store.dispatch(a)).await);
    api.state.borrow_mut().calls.clear();
    api
}

#[tokio::test]
async fn test_week_request_is_keyed_by_monday() {
    let api = signed_in_api().await;
    let today = date(2024, 6, 5);
    let mut cursor = WeekCursor::default();

    let week0 = api.availability(PRO, cursor.range(today).start).await.unwrap();
    assert_eq!(week0.len(), 3);

    cursor.next();
    let week1 = api.availability(PRO, cursor.range(today).start).await.unwrap();
    assert_eq!(week1, vec![slot("2024-06-11T09:00:00Z")]);

    assert_eq!(
        api.calls(),
        vec![
            Call::Availability(PRO.into(), date(2024, 6, 3)),
            Call::Availability(PRO.into(), date(2024, 6, 10)),
        ]
    );
}

#[tokio::test]
async fn test_selecting_a_slot_never_submits() {
    let api = signed_in_api().await;
    let mut flow = BookingFlow::default();

    assert_eq!(
        flow.select(slot("2024-06-03T10:00:00Z"), true),
        SlotClick::AwaitingConfirmation
    );
    flow.select(slot("2024-06-03T09:00:00Z"), true);
    flow.cancel();

    assert_eq!(flow.begin_submit(), None);
    assert_eq!(api.book_calls(), 0);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_booked_slot_disappears_from_week() {
    let api = signed_in_api().await;
    let week_start = date(2024, 6, 3);
    let target = slot("2024-06-03T10:00:00Z");

    let before = api.availability(PRO, week_start).await.unwrap();
    assert!(before.contains(&target));

    let mut flow = BookingFlow::default();
    flow.select(target, true);
    let submitting = flow.begin_submit().unwrap();
    assert_eq!(submitting, target);

    let booked = booking::submit_booking(&api, PRO, submitting, week_start)
        .await
        .unwrap();
    flow.succeed();

    let refreshed = booked.refreshed.unwrap();
    assert!(!refreshed.contains(&target));
    assert_eq!(refreshed.len(), before.len() - 1);
    assert!(flow.shows_success());
    assert!(!flow.is_submitting());

    assert_eq!(
        api.calls()[1..],
        [
            Call::Book(PRO.into(), target),
            Call::Availability(PRO.into(), week_start),
        ]
    );
}

#[tokio::test]
async fn test_rejected_booking_leaves_availability_alone() {
    let api = signed_in_api().await;
    api.state.borrow_mut().book_error = Some(ApiError::Status {
        status: 400,
        message: "Appointments must be booked 24h in advance".into(),
    });
    let week_start = date(2024, 6, 3);

    let mut flow = BookingFlow::default();
    flow.select(slot("2024-06-03T09:00:00Z"), true);
    let s = flow.begin_submit().unwrap();

    let err = booking::submit_booking(&api, PRO, s, week_start)
        .await
        .unwrap_err();
    flow.fail(&err);

    assert_eq!(
        flow.error(),
        Some("Appointments must be booked 24h in advance")
    );
    // No re-fetch after a failed booking
    assert_eq!(api.calls(), vec![Call::Book(PRO.into(), s)]);
    assert_eq!(api.state.borrow().open_slots.len(), 4);
}

#[tokio::test]
async fn test_double_booking_same_slot_conflicts() {
    let api = signed_in_api().await;
    let week_start = date(2024, 6, 3);
    let target = slot("2024-06-05T14:00:00Z");

    booking::submit_booking(&api, PRO, target, week_start)
        .await
        .unwrap();
    let err = booking::submit_booking(&api, PRO, target, week_start)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Slot is no longer available");
}

#[tokio::test]
async fn test_failed_refresh_keeps_booking() {
    let api = signed_in_api().await;
    api.state.borrow_mut().availability_error = Some(ApiError::Network("Failed to fetch".into()));

    let booked = booking::submit_booking(&api, PRO, slot("2024-06-03T09:00:00Z"), date(2024, 6, 3))
        .await
        .unwrap();
    assert_eq!(booked.refreshed, None);
    assert_eq!(api.book_calls(), 1);
}

#[tokio::test]
async fn test_signed_out_booking_is_rejected_by_server() {
    let api = FakeApi::default();
    api.state.borrow_mut().open_slots = vec![slot("2024-06-03T09:00:00Z")];

    let err = booking::submit_booking(&api, PRO, slot("2024-06-03T09:00:00Z"), date(2024, 6, 3))
        .await
        .unwrap_err();
    assert!(err.is_unauthenticated());
}
