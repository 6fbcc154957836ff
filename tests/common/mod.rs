#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use psi_booking::api::*;
use psi_booking::error::ApiError;
use psi_booking::listing::ListingQuery;
use psi_booking::session::{Session, SessionAction};

/// Every call the fake received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(String),
    Login(String),
    Logout,
    CurrentUser,
    Themes,
    Professionals(ListingQuery),
    Availability(String, NaiveDate),
    Book(String, Slot),
    MyAppointments(u32, u32),
}

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub user: Option<User>,
    /// Password the fake accepts at login.
    pub password: String,
    pub register_error: Option<ApiError>,
    pub logout_error: Option<ApiError>,
    pub book_error: Option<ApiError>,
    pub availability_error: Option<ApiError>,
    pub open_slots: Vec<Slot>,
}

/// In-memory booking service.
#[derive(Clone, Default)]
pub struct FakeApi {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn book_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Book(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status {
        status: 401,
        message: "Unauthorized".into(),
    }
}

impl BookingApi for FakeApi {
    async fn register(&self, body: &RegisterRequest) -> Result<(), ApiError> {
        self.record(Call::Register(body.email.clone()));
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.register_error.clone() {
            return Err(err);
        }
        state.password = body.password.clone();
        Ok(())
    }

    async fn login(&self, body: &LoginRequest) -> Result<(), ApiError> {
        self.record(Call::Login(body.email.clone()));
        let mut state = self.state.borrow_mut();
        if body.password != state.password {
            return Err(ApiError::Status {
                status: 401,
                message: "Invalid credentials".into(),
            });
        }
        state.user = Some(User {
            id: "u1".into(),
            first_name: "Ana".into(),
            last_name: "Rossi".into(),
            email: body.email.clone(),
        });
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Call::Logout);
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.logout_error.clone() {
            return Err(err);
        }
        state.user = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.record(Call::CurrentUser);
        self.state.borrow().user.clone().ok_or_else(unauthorized)
    }

    async fn themes(&self) -> Result<Vec<Theme>, ApiError> {
        self.record(Call::Themes);
        Ok(vec![])
    }

    async fn professionals(
        &self,
        query: &ListingQuery,
    ) -> Result<Paginated<Professional>, ApiError> {
        self.record(Call::Professionals(query.clone()));
        Ok(Paginated {
            data: vec![],
            meta: PageMeta {
                total: 0,
                page: query.page,
                limit: query.limit,
                total_pages: 0,
            },
        })
    }

    async fn availability(
        &self,
        professional_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<Slot>, ApiError> {
        self.record(Call::Availability(professional_id.to_string(), week_start));
        let state = self.state.borrow();
        if let Some(err) = state.availability_error.clone() {
            return Err(err);
        }
        let week_end = week_start + chrono::Days::new(7);
        Ok(state
            .open_slots
            .iter()
            .filter(|s| {
                let day = s.date_naive();
                day >= week_start && day < week_end
            })
            .copied()
            .collect())
    }

    async fn book(&self, professional_id: &str, start_at: Slot) -> Result<(), ApiError> {
        self.record(Call::Book(professional_id.to_string(), start_at));
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.book_error.clone() {
            return Err(err);
        }
        if state.user.is_none() {
            return Err(unauthorized());
        }
        let before = state.open_slots.len();
        state.open_slots.retain(|s| *s != start_at);
        if state.open_slots.len() == before {
            return Err(ApiError::Status {
                status: 409,
                message: "Slot is no longer available".into(),
            });
        }
        Ok(())
    }

    async fn my_appointments(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Appointment>, ApiError> {
        self.record(Call::MyAppointments(page, limit));
        Ok(Paginated {
            data: vec![],
            meta: PageMeta {
                total: 0,
                page,
                limit,
                total_pages: 0,
            },
        })
    }
}

/// A session store for driving the async flows outside the browser.
#[derive(Default)]
pub struct Store {
    pub session: RefCell<Session>,
    pub log: RefCell<Vec<SessionAction>>,
}

impl Store {
    pub fn dispatch(&self, action: SessionAction) {
        self.log.borrow_mut().push(action.clone());
        self.session.borrow_mut().reduce(action);
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }
}

pub fn slot(s: &str) -> Slot {
    s.parse().unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
