use leptos::prelude::*;

use crate::api::Professional;

#[component]
pub fn ProfessionalCard(
    professional: Professional,
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let id = professional.id.clone();
    let tags = professional
        .themes
        .iter()
        .map(|theme| view! { <span class="tag">{theme.name.clone()}</span> })
        .collect::<Vec<_>>();
    let has_tags = !tags.is_empty();

    view! {
        <button
            type="button"
            class="professional-card"
            on:click=move |_| on_select.run(id.clone())
        >
            <div class="avatar">{professional.initials()}</div>
            <div class="professional-card-body">
                <div class="professional-card-header">
                    <h2 class="professional-name">{professional.full_name()}</h2>
                    <span class="professional-price">{professional.price_label()}</span>
                </div>
                <p class="professional-bio">{professional.bio.clone()}</p>
                {has_tags.then(|| view! { <div class="tag-list">{tags}</div> })}
                <p class="professional-cta">"Click to view schedule"</p>
            </div>
        </button>
    }
}
