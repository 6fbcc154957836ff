use chrono::Local;
use leptos::prelude::*;
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

use crate::api::{Appointment, BookingApi, HttpApi};
use crate::app::SessionContext;
use crate::components::pagination::PaginationControls;
use crate::components::status_badge::StatusBadge;
use crate::fetch_guard::FetchGuard;
use crate::listing::PAGE_SIZE;
use crate::pagination::Pager;
use crate::schedule;

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let ctx = expect_context::<SessionContext>();

    let page = RwSignal::new(1u32);
    let (appointments, set_appointments) = signal::<Vec<Appointment>>(vec![]);
    let (pager, set_pager) = signal::<Option<Pager>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let guard = StoredValue::new(FetchGuard::default());

    let signed_in = Memo::new(move |_| ctx.session.with(|s| s.is_signed_in()));

    // Only fetch once we know someone is signed in
    Effect::new(move |_| {
        let signed_in = signed_in.get();
        let p = page.get();
        if !signed_in {
            return;
        }
        let Some(ticket) = guard.try_update_value(|g| g.issue()) else {
            return;
        };
        set_loading.set(true);
        set_error.set(None);

        let api = api.clone();
        spawn_local(async move {
            let result = api.my_appointments(p, PAGE_SIZE).await;
            if !guard.try_with_value(|g| g.is_current(ticket)).unwrap_or(false) {
                debug!("Dropping stale appointments page {}", p);
                return;
            }
            match result {
                Ok(list) => {
                    set_pager.set(Some(Pager::from_meta(&list.meta)));
                    set_appointments.set(list.data);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let go_to_page = Callback::new(move |p: u32| page.set(p.max(1)));

    view! {
        <div class="page appointments-page">
            <header class="page-header">
                <h1>"My Appointments"</h1>
                <p class="page-description">"View your upcoming and past appointments."</p>
            </header>

            {move || {
                let (settled, signed_in) = ctx.session.with(|s| (s.is_settled(), s.is_signed_in()));
                if !settled || (signed_in && loading.get()) {
                    view! { <p class="page-message">"Loading appointments..."</p> }.into_any()
                } else if !signed_in {
                    view! {
                        <p class="page-message">
                            <a href="/login">"Log in"</a>
                            " to see your appointments."
                        </p>
                    }.into_any()
                } else if let Some(err) = error.get() {
                    view! { <p class="page-message status-error">{err}</p> }.into_any()
                } else if appointments.with(|a| a.is_empty()) {
                    view! { <p class="page-message">"You have no appointments yet."</p> }.into_any()
                } else {
                    view! {
                        <div class="card-list">
                            {appointments.get().into_iter().map(|appt| view! {
                                <div class="appointment-card">
                                    <div>
                                        <h2 class="professional-name">{appt.professional_name()}</h2>
                                        <p class="appointment-time">
                                            {schedule::format_date_time(&appt.start_at, &Local)}
                                        </p>
                                    </div>
                                    <StatusBadge status=appt.status />
                                </div>
                            }).collect::<Vec<_>>()}
                        </div>
                        {pager.get().map(|pager| view! {
                            <PaginationControls pager=pager on_page=go_to_page />
                        })}
                    }.into_any()
                }
            }}
        </div>
    }
}
