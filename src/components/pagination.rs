use leptos::prelude::*;

use crate::pagination::Pager;

/// Previous / "Page P of T" / Next. Renders nothing for a single page.
#[component]
pub fn PaginationControls(
    pager: Pager,
    /// Called with the page to load.
    on_page: Callback<u32>,
) -> impl IntoView {
    let previous = pager.previous();
    let next = pager.next();

    pager.is_visible().then(|| {
        view! {
            <div class="pagination">
                <button
                    class="btn btn-secondary"
                    disabled=previous.is_none()
                    on:click=move |_| {
                        if let Some(p) = previous {
                            on_page.run(p);
                        }
                    }
                >
                    "Previous"
                </button>
                <span class="pagination-label">{pager.label()}</span>
                <button
                    class="btn btn-secondary"
                    disabled=next.is_none()
                    on:click=move |_| {
                        if let Some(p) = next {
                            on_page.run(p);
                        }
                    }
                >
                    "Next"
                </button>
            </div>
        }
    })
}
