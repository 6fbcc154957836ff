use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{HttpApi, LoginRequest, MIN_PASSWORD_LEN};
use crate::app::SessionContext;
use crate::session::{self, SessionAction};

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let ctx = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    on_cleanup(move || ctx.dispatch(SessionAction::ClearError));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let credentials = LoginRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if let Err(msg) = credentials.validate() {
            set_form_error.set(Some(msg));
            return;
        }
        set_form_error.set(None);

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            if session::log_in(&api, &credentials, &move |action| ctx.dispatch(action)).await {
                navigate("/", Default::default());
            }
        });
    };

    let loading = move || ctx.session.with(|s| s.is_loading());
    let shown_error = move || form_error.get().or_else(|| ctx.session.with(|s| s.error.clone()));

    view! {
        <div class="page auth-page">
            <div class="auth-card">
                <h1>"Log in"</h1>

                {move || shown_error().map(|err| view! { <div class="notice notice-error">{err}</div> })}

                <form class="auth-form" on:submit=on_submit>
                    <input
                        type="email"
                        placeholder="Email"
                        class="input"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class="input"
                        required
                        minlength=MIN_PASSWORD_LEN.to_string()
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary" disabled=loading>
                        {move || if loading() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Don't have an account? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
