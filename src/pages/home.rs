use leptos::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::{BookingApi, HttpApi, Professional, Theme};
use crate::components::pagination::PaginationControls;
use crate::components::professional_card::ProfessionalCard;
use crate::components::professional_modal::ProfessionalModal;
use crate::fetch_guard::FetchGuard;
use crate::listing::ListingQuery;
use crate::pagination::Pager;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<HttpApi>();

    let (themes, set_themes) = signal::<Vec<Theme>>(vec![]);
    let query = RwSignal::new(ListingQuery::default());

    let (professionals, set_professionals) = signal::<Vec<Professional>>(vec![]);
    let (pager, set_pager) = signal::<Option<Pager>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<Option<String>>(None);
    let guard = StoredValue::new(FetchGuard::default());

    // Filter bar
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.themes().await {
                    Ok(list) => set_themes.set(list),
                    Err(e) => warn!("Failed to load themes: {}", e),
                }
            });
        });
    }

    // Listing, re-run on every filter or page change
    Effect::new(move |_| {
        let q = query.get();
        let Some(ticket) = guard.try_update_value(|g| g.issue()) else {
            return;
        };
        set_loading.set(true);
        set_error.set(None);

        let api = api.clone();
        spawn_local(async move {
            let result = api.professionals(&q).await;
            if !guard.try_with_value(|g| g.is_current(ticket)).unwrap_or(false) {
                debug!("Dropping stale listing for page {}", q.page);
                return;
            }
            match result {
                Ok(page) => {
                    set_pager.set(Some(Pager::from_meta(&page.meta)));
                    set_professionals.set(page.data);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let go_to_page = Callback::new(move |page: u32| query.update(|q| q.go_to(page)));
    let open_profile = Callback::new(move |id: String| set_selected.set(Some(id)));
    let close_profile = Callback::new(move |_: ()| set_selected.set(None));

    view! {
        <div class="page home-page">
            <header class="page-header">
                <h1>"Find Your Psychologist"</h1>
                <p class="page-description">
                    "Browse our network of licensed professionals. Filter by specialty, "
                    "explore profiles, and book an appointment that fits your schedule."
                </p>
            </header>

            <Show when=move || !themes.with(|t| t.is_empty())>
                <div class="theme-filters">
                    {move || themes.get().into_iter().map(|theme| {
                        let slug = theme.slug.clone();
                        let active_slug = theme.slug.clone();
                        view! {
                            <button
                                class=move || {
                                    if query.with(|q| q.is_active(&active_slug)) {
                                        "filter-chip filter-chip-active"
                                    } else {
                                        "filter-chip"
                                    }
                                }
                                on:click=move |_| query.update(|q| q.toggle_theme(&slug))
                            >
                                {theme.name}
                            </button>
                        }
                    }).collect::<Vec<_>>()}
                </div>
            </Show>

            {move || {
                if loading.get() {
                    view! { <p class="page-message">"Loading professionals..."</p> }.into_any()
                } else if let Some(err) = error.get() {
                    view! { <p class="page-message status-error">{err}</p> }.into_any()
                } else if professionals.with(|p| p.is_empty()) {
                    view! { <p class="page-message">"No professionals found."</p> }.into_any()
                } else {
                    view! {
                        <div class="card-list">
                            {professionals.get().into_iter().map(|pro| view! {
                                <ProfessionalCard professional=pro on_select=open_profile />
                            }).collect::<Vec<_>>()}
                        </div>
                        {pager.get().map(|pager| view! {
                            <PaginationControls pager=pager on_page=go_to_page />
                        })}
                    }.into_any()
                }
            }}

            {move || {
                selected.get()
                    .and_then(|id| professionals.with(|list| list.iter().find(|p| p.id == id).cloned()))
                    .map(|pro| view! { <ProfessionalModal professional=pro on_close=close_profile /> })
            }}
        </div>
    }
}
