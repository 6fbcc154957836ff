use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpApi;
use crate::app::SessionContext;
use crate::appearance::AppearanceContext;
use crate::session;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let api = expect_context::<HttpApi>();
    let AppearanceContext {
        appearance,
        set_appearance,
    } = expect_context::<AppearanceContext>();

    let logout = Callback::new(move |_: ()| {
        let api = api.clone();
        spawn_local(async move {
            session::log_out(&api, &move |action| ctx.dispatch(action)).await;
        });
    });

    let signed_in_name = move || ctx.session.with(|s| s.user.as_ref().map(|u| u.full_name()));
    let logout_error = move || ctx.session.with(|s| s.logout_error().map(String::from));

    view! {
        <nav class="navbar">
            <div class="navbar-inner">
                <a href="/" class="navbar-brand">"PSI Mammoliti"</a>

                <div class="navbar-actions">
                    <button
                        class="btn btn-ghost appearance-toggle"
                        title="Toggle appearance"
                        on:click=move |_| set_appearance.update(|a| *a = a.cycle())
                    >
                        {move || appearance.get().label()}
                    </button>

                    <Show when=move || ctx.session.with(|s| s.is_settled())>
                        {move || match signed_in_name() {
                            Some(name) => view! {
                                <a href="/appointments" class="nav-link">"My appointments"</a>
                                <span class="navbar-user">{name}</span>
                                {move || logout_error().map(|err| view! {
                                    <span class="notice notice-error navbar-error">{err}</span>
                                })}
                                <button class="btn btn-primary" on:click=move |_| logout.run(())>
                                    "Logout"
                                </button>
                            }.into_any(),
                            None => view! {
                                <a href="/login" class="nav-link">"Login"</a>
                                <a href="/register" class="btn btn-primary">"Register"</a>
                            }.into_any(),
                        }}
                    </Show>
                </div>
            </div>
        </nav>
    }
}
