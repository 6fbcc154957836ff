//! Client for the booking service's JSON API.
//!
//! [`BookingApi`] is the seam between UI logic and transport: pages and the
//! session/booking drivers are written against it, [`HttpApi`] implements it
//! with the browser's `fetch`.

mod http;
mod types;

use chrono::NaiveDate;

pub use http::HttpApi;
pub use types::*;

use crate::error::ApiError;
use crate::listing::ListingQuery;

#[allow(async_fn_in_trait)]
pub trait BookingApi {
    async fn register(&self, body: &RegisterRequest) -> Result<(), ApiError>;

    async fn login(&self, body: &LoginRequest) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// The identity behind the session cookie.
    async fn current_user(&self) -> Result<User, ApiError>;

    async fn themes(&self) -> Result<Vec<Theme>, ApiError>;

    async fn professionals(
        &self,
        query: &ListingQuery,
    ) -> Result<Paginated<Professional>, ApiError>;

    /// Open start times for the week beginning on `week_start` (a Monday).
    async fn availability(
        &self,
        professional_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<Slot>, ApiError>;

    async fn book(&self, professional_id: &str, start_at: Slot) -> Result<(), ApiError>;

    async fn my_appointments(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Appointment>, ApiError>;
}
