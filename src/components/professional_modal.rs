//! Booking dialog: professional details, week-by-week availability and the
//! confirm-before-submit booking step.

use std::time::Duration;

use chrono::Local;
use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::{BookingApi, HttpApi, Professional, Slot};
use crate::app::SessionContext;
use crate::booking::{self, BookingFlow, SlotClick, SUCCESS_NOTICE_MS};
use crate::fetch_guard::FetchGuard;
use crate::schedule::{self, WeekCursor};

fn lock_body_scroll(locked: bool) {
    let Some(body) = document().body() else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    let _ = body.style().set_property("overflow", value);
}

#[component]
pub fn ProfessionalModal(
    professional: Professional,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let ctx = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let today = Local::now().date_naive();
    let professional_id = professional.id.clone();

    let week = RwSignal::new(WeekCursor::default());
    let slots = RwSignal::new(Vec::<Slot>::new());
    let slots_loading = RwSignal::new(true);
    let flow = RwSignal::new(BookingFlow::default());
    let guard = StoredValue::new(FetchGuard::default());

    // Re-fetch whenever the displayed week changes
    {
        let api = api.clone();
        let professional_id = professional_id.clone();
        Effect::new(move |_| {
            let range = week.get().range(today);
            let Some(ticket) = guard.try_update_value(|g| g.issue()) else {
                return;
            };
            slots_loading.set(true);

            let api = api.clone();
            let professional_id = professional_id.clone();
            spawn_local(async move {
                let result = api.availability(&professional_id, range.start).await;
                if !guard.try_with_value(|g| g.is_current(ticket)).unwrap_or(false) {
                    debug!("Dropping stale availability for week of {}", range.query_value());
                    return;
                }
                match result {
                    Ok(list) => slots.set(list),
                    Err(e) => {
                        warn!("Failed to load availability: {}", e);
                        slots.set(vec![]);
                    }
                }
                slots_loading.set(false);
            });
        });
    }

    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    lock_body_scroll(true);
    on_cleanup(move || {
        keydown.remove();
        lock_body_scroll(false);
    });

    let select_slot = move |slot: Slot| {
        let signed_in = ctx.session.with_untracked(|s| s.is_signed_in());
        match flow.try_update(|f| f.select(slot, signed_in)) {
            Some(SlotClick::LoginRequired) => navigate("/login", Default::default()),
            Some(SlotClick::AwaitingConfirmation) | Some(SlotClick::Ignored) | None => {}
        }
    };

    let confirm = {
        let api = api.clone();
        let professional_id = professional_id.clone();
        move |_: ev::MouseEvent| {
            let Some(slot) = flow.try_update(|f| f.begin_submit()).flatten() else {
                return;
            };
            let week_start = week.get_untracked().range(today).start;
            // The refreshed list supersedes any week fetch still in flight
            let Some(ticket) = guard.try_update_value(|g| g.issue()) else {
                return;
            };
            slots_loading.set(false);

            let api = api.clone();
            let professional_id = professional_id.clone();
            spawn_local(async move {
                match booking::submit_booking(&api, &professional_id, slot, week_start).await {
                    Ok(booked) => {
                        let notice = flow.try_update(|f| f.succeed());
                        let current = guard.try_with_value(|g| g.is_current(ticket)).unwrap_or(false);
                        if let (Some(list), true) = (booked.refreshed, current) {
                            slots.set(list);
                        }
                        if let Some(notice) = notice {
                            set_timeout(
                                move || flow.update(|f| f.dismiss_success(notice)),
                                Duration::from_millis(SUCCESS_NOTICE_MS),
                            );
                        }
                    }
                    Err(e) => flow.update(|f| f.fail(&e)),
                }
            });
        }
    };

    let tags = professional
        .themes
        .iter()
        .map(|theme| view! { <span class="tag tag-outline">{theme.name.clone()}</span> })
        .collect::<Vec<_>>();
    let has_tags = !tags.is_empty();
    let full_name = professional.full_name();
    let confirm_name = full_name.clone();

    view! {
        <div
            class="modal-overlay"
            on:click=move |_| on_close.run(())
        >
            <div class="modal-content professional-modal" on:click=move |ev| ev.stop_propagation()>
                <button class="modal-close" title="Close" on:click=move |_| on_close.run(())>
                    "\u{2715}"
                </button>

                <div class="modal-section">
                    <div class="professional-header">
                        <div class="avatar avatar-large">{professional.initials()}</div>
                        <div>
                            <h2 class="professional-name">{full_name}</h2>
                            <p class="professional-price">{professional.price_label()}</p>
                        </div>
                    </div>
                    <p class="professional-bio">{professional.bio.clone()}</p>
                    {has_tags.then(|| view! { <div class="tag-list">{tags}</div> })}
                </div>

                <div class="modal-section schedule">
                    <div class="week-nav">
                        <button
                            class="btn btn-secondary"
                            disabled=move || !week.with(|w| w.can_go_back())
                            on:click=move |_| {
                                week.update(|w| {
                                    w.previous();
                                });
                            }
                        >
                            "\u{2039} Previous"
                        </button>
                        <div class="week-label">
                            <p class="week-range">{move || week.get().range(today).label()}</p>
                            <p class="week-count">
                                {move || {
                                    if slots_loading.get() {
                                        "Loading...".to_string()
                                    } else {
                                        schedule::slot_count_label(slots.with(|s| s.len()))
                                    }
                                }}
                            </p>
                        </div>
                        <button class="btn btn-secondary" on:click=move |_| week.update(|w| w.next())>
                            "Next \u{203A}"
                        </button>
                    </div>

                    <Show when=move || flow.with(|f| f.shows_success())>
                        <div class="notice notice-success">"Appointment booked successfully!"</div>
                    </Show>
                    {move || flow.with(|f| f.error().map(String::from)).map(|err| view! {
                        <div class="notice notice-error">{err}</div>
                    })}

                    {move || {
                        if slots_loading.get() {
                            return view! {
                                <p class="page-message">"Loading availability..."</p>
                            }.into_any();
                        }
                        let list = slots.get();
                        if list.is_empty() {
                            return view! {
                                <div class="empty-week">
                                    <p>"No available appointments this week."</p>
                                    <button class="btn-link" on:click=move |_| week.update(|w| w.next())>
                                        "Check next week"
                                    </button>
                                </div>
                            }.into_any();
                        }
                        let days = schedule::group_by_day(&list, &Local);
                        view! {
                            <div class="slot-days">
                                {days.into_iter().map(|day| {
                                    let header = schedule::format_day_header(&day.slots[0], &Local);
                                    view! {
                                        <div class="slot-day">
                                            <p class="slot-day-header">{header}</p>
                                            <div class="slot-list">
                                                {day.slots.into_iter().map(|slot| {
                                                    let select_slot = select_slot.clone();
                                                    view! {
                                                        <button
                                                            class="slot-btn"
                                                            disabled=move || flow.with(|f| f.is_submitting())
                                                            on:click=move |_| select_slot(slot)
                                                        >
                                                            {move || {
                                                                if flow.with(|f| f.submitting() == Some(slot)) {
                                                                    "Booking...".to_string()
                                                                } else {
                                                                    schedule::format_time(&slot, &Local)
                                                                }
                                                            }}
                                                        </button>
                                                    }
                                                }).collect::<Vec<_>>()}
                                            </div>
                                        </div>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_any()
                    }}
                </div>
            </div>

            // Confirmation step
            {move || flow.with(|f| f.pending()).map(|slot| {
                let confirm = confirm.clone();
                let name = confirm_name.clone();
                let when = format!(
                    "{} at {}",
                    schedule::format_day_header(&slot, &Local),
                    schedule::format_time(&slot, &Local)
                );
                view! {
                    <div class="modal-overlay modal-overlay-top" on:click=move |ev| ev.stop_propagation()>
                        <div class="modal-content confirm-dialog">
                            <h3>"Confirm appointment"</h3>
                            <p>
                                "Book an appointment with "
                                <strong>{name}</strong>
                                " on "
                                <strong>{when}</strong>
                                "?"
                            </p>
                            <div class="modal-actions">
                                <button class="btn btn-secondary" on:click=move |_| flow.update(|f| f.cancel())>
                                    "Cancel"
                                </button>
                                <button class="btn btn-primary" on:click=confirm>
                                    "Confirm"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}
