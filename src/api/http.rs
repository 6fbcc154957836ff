use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::form_urlencoded;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

use super::types::*;
use super::BookingApi;
use crate::config::AppConfig;
use crate::error::{ApiError, ErrorBody};
use crate::listing::ListingQuery;

/// `fetch`-backed client. Every request carries the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and return the response on 2xx, or the decoded error otherwise.
    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        opts.set_credentials(RequestCredentials::Include);
        if let Some(json) = &body {
            opts.set_body(&JsValue::from_str(json));
        }

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|e| ApiError::Network(js_error_text(&e)))?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| ApiError::Network(js_error_text(&e)))?;
        }

        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::Network(js_error_text(&e)))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Decode("response is not a Response".to_string()))?;

        if resp.ok() {
            return Ok(resp);
        }

        let status = resp.status();
        let error_body = match read_json(&resp).await {
            Ok(value) => serde_wasm_bindgen::from_value::<ErrorBody>(value).ok(),
            Err(_) => None,
        };
        let err = ApiError::from_status(status, error_body);
        if !err.is_unauthenticated() {
            warn!("{} {} failed with {}: {}", method, url, status, err);
        }
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send("GET", path, None).await?;
        decode(&resp).await
    }

    /// POST where the response body is not needed.
    async fn post<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<(), ApiError> {
        let json = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send("POST", path, json).await.map(|_| ())
    }
}

async fn read_json(resp: &Response) -> Result<JsValue, ApiError> {
    let promise = resp
        .json()
        .map_err(|e| ApiError::Decode(js_error_text(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(js_error_text(&e)))
}

async fn decode<T: DeserializeOwned>(resp: &Response) -> Result<T, ApiError> {
    let value = read_json(resp).await?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error_text(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

// -- Paths --

fn professionals_path(query: &ListingQuery) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    if let Some(themes) = query.themes_param() {
        params.append_pair("themes", &themes);
    }
    params.append_pair("page", &query.page.to_string());
    params.append_pair("limit", &query.limit.to_string());
    format!("/professionals?{}", params.finish())
}

fn availability_path(professional_id: &str, week_start: NaiveDate) -> String {
    format!(
        "/professionals/{}/appointments/availability?weekStart={}",
        urlencoding::encode(professional_id),
        week_start.format("%Y-%m-%d")
    )
}

fn book_path(professional_id: &str) -> String {
    format!(
        "/professionals/{}/appointments",
        urlencoding::encode(professional_id)
    )
}

fn appointments_path(page: u32, limit: u32) -> String {
    format!("/appointments?page={}&limit={}", page, limit)
}

impl BookingApi for HttpApi {
    async fn register(&self, body: &RegisterRequest) -> Result<(), ApiError> {
        self.post("/auth/register", Some(body)).await
    }

    async fn login(&self, body: &LoginRequest) -> Result<(), ApiError> {
        self.post("/auth/login", Some(body)).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post::<()>("/auth/logout", None).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/users/me").await
    }

    async fn themes(&self) -> Result<Vec<Theme>, ApiError> {
        self.get_json("/themes").await
    }

    async fn professionals(
        &self,
        query: &ListingQuery,
    ) -> Result<Paginated<Professional>, ApiError> {
        self.get_json(&professionals_path(query)).await
    }

    async fn availability(
        &self,
        professional_id: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<Slot>, ApiError> {
        let resp: AvailabilityResponse = self
            .get_json(&availability_path(professional_id, week_start))
            .await?;
        Ok(resp.slots)
    }

    async fn book(&self, professional_id: &str, start_at: Slot) -> Result<(), ApiError> {
        let body = CreateAppointmentRequest { start_at };
        self.post(&book_path(professional_id), Some(&body)).await
    }

    async fn my_appointments(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Appointment>, ApiError> {
        self.get_json(&appointments_path(page, limit)).await
    }
}
