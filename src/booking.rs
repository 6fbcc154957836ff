//! Two-step booking: pick a slot, then confirm it.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{BookingApi, Slot};
use crate::error::ApiError;

/// How long the "booked" notice stays up.
pub const SUCCESS_NOTICE_MS: u64 = 3000;

pub const BOOKING_FAILED: &str = "Failed to book appointment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClick {
    /// Signed out; send the user to the login page instead.
    LoginRequired,
    AwaitingConfirmation,
    /// A submission is already in flight.
    Ignored,
}

/// Identifies one success notice so a stale timer cannot hide a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeId(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFlow {
    pending: Option<Slot>,
    submitting: Option<Slot>,
    error: Option<String>,
    notice: Option<NoticeId>,
    notices_shown: u64,
}

impl BookingFlow {
    pub fn pending(&self) -> Option<Slot> {
        self.pending
    }

    pub fn submitting(&self) -> Option<Slot> {
        self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn shows_success(&self) -> bool {
        self.notice.is_some()
    }

    pub fn select(&mut self, slot: Slot, signed_in: bool) -> SlotClick {
        if self.is_submitting() {
            return SlotClick::Ignored;
        }
        if !signed_in {
            return SlotClick::LoginRequired;
        }
        self.error = None;
        self.pending = Some(slot);
        SlotClick::AwaitingConfirmation
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Move the pending slot to in-flight. `None` means there is nothing to submit.
    pub fn begin_submit(&mut self) -> Option<Slot> {
        if self.is_submitting() {
            return None;
        }
        let slot = self.pending.take()?;
        self.submitting = Some(slot);
        self.error = None;
        Some(slot)
    }

    pub fn succeed(&mut self) -> NoticeId {
        self.submitting = None;
        self.notices_shown += 1;
        let id = NoticeId(self.notices_shown);
        self.notice = Some(id);
        id
    }

    pub fn fail(&mut self, error: &ApiError) {
        self.submitting = None;
        self.error = Some(error.message_or(BOOKING_FAILED));
    }

    pub fn dismiss_success(&mut self, id: NoticeId) {
        if self.notice == Some(id) {
            self.notice = None;
        }
    }
}

/// Result of a confirmed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booked {
    /// Fresh availability for the week, or `None` if re-fetching it failed.
    pub refreshed: Option<Vec<Slot>>,
}

/// Submit the booking and re-fetch the week so the taken slot disappears.
/// A failed re-fetch does not undo a successful booking.
pub async fn submit_booking<A: BookingApi>(
    api: &A,
    professional_id: &str,
    slot: Slot,
    week_start: NaiveDate,
) -> Result<Booked, ApiError> {
    api.book(professional_id, slot).await?;
    info!("Booked {} with professional {}", slot, professional_id);

    let refreshed = match api.availability(professional_id, week_start).await {
        Ok(slots) => Some(slots),
        Err(e) => {
            warn!("Could not refresh availability after booking: {}", e);
            None
        }
    };
    Ok(Booked { refreshed })
}
