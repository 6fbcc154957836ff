use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::{HttpApi, RegisterRequest, MIN_PASSWORD_LEN};
use crate::app::SessionContext;
use crate::session::{self, SessionAction};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let ctx = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    on_cleanup(move || ctx.dispatch(SessionAction::ClearError));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = RegisterRequest {
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if let Err(msg) = form.validate() {
            set_form_error.set(Some(msg));
            return;
        }
        set_form_error.set(None);

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            if session::register(&api, &form, &move |action| ctx.dispatch(action)).await {
                navigate("/", Default::default());
            }
        });
    };

    let loading = move || ctx.session.with(|s| s.is_loading());
    let shown_error = move || form_error.get().or_else(|| ctx.session.with(|s| s.error.clone()));
    let password_hint = format!("Password (min {} chars)", MIN_PASSWORD_LEN);

    view! {
        <div class="page auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>

                {move || shown_error().map(|err| view! { <div class="notice notice-error">{err}</div> })}

                <form class="auth-form" on:submit=on_submit>
                    <div class="input-row">
                        <input
                            type="text"
                            placeholder="First name"
                            class="input"
                            required
                            prop:value=move || first_name.get()
                            on:input=move |ev| set_first_name.set(event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Last name"
                            class="input"
                            required
                            prop:value=move || last_name.get()
                            on:input=move |ev| set_last_name.set(event_target_value(&ev))
                        />
                    </div>
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
                        placeholder=password_hint
                        class="input"
                        required
                        minlength=MIN_PASSWORD_LEN.to_string()
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary" disabled=loading>
                        {move || if loading() { "Creating account..." } else { "Register" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Already have an account? "
                    <a href="/login">"Log in"</a>
                </p>
            </div>
        </div>
    }
}
