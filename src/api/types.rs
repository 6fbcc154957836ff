use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A bookable start time.
pub type Slot = DateTime<Utc>;

pub const MIN_PASSWORD_LEN: usize = 6;

// -- Identity --

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        require("Email", &self.email)?;
        validate_password(&self.password)
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        require("First name", &self.first_name)?;
        require("Last name", &self.last_name)?;
        require("Email", &self.email)?;
        validate_password(&self.password)
    }

    pub fn credentials(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

fn require(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ))
    } else {
        Ok(())
    }
}

// -- Catalog --

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(deserialize_with = "price_from_string_or_number")]
    pub price: f64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

impl Professional {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn initials(&self) -> String {
        initials(&self.first_name, &self.last_name)
    }

    pub fn price_label(&self) -> String {
        format!("${:.0}/session", self.price)
    }
}

pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Decimal columns arrive as JSON strings ("120.00"); accept plain numbers too.
fn price_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price '{}': {}", s, e))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub start_at: Slot,
}

// -- Appointments --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub professional_id: String,
    pub professional_first_name: String,
    pub professional_last_name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn professional_name(&self) -> String {
        format!(
            "{} {}",
            self.professional_first_name, self.professional_last_name
        )
    }
}

// -- Pagination --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
