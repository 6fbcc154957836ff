use leptos::prelude::*;

use crate::api::AppointmentStatus;

#[component]
pub fn StatusBadge(status: AppointmentStatus) -> impl IntoView {
    let class = match status {
        AppointmentStatus::Confirmed => "status-badge status-confirmed",
        AppointmentStatus::Pending => "status-badge status-pending",
        AppointmentStatus::Cancelled => "status-badge status-cancelled",
        AppointmentStatus::Completed => "status-badge status-completed",
        AppointmentStatus::Unknown => "status-badge",
    };

    view! { <span class=class>{status.label()}</span> }
}
