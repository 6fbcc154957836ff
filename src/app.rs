use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::info;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpApi;
use crate::appearance::{apply_appearance, load_appearance, save_appearance, AppearanceContext};
use crate::components::navbar::Navbar;
use crate::config::AppConfig;
use crate::pages::appointments::AppointmentsPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::session::{self, Session, SessionAction};

/// The signed-in user and auth status, shared by every page.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Session>,
}

impl SessionContext {
    pub fn dispatch(&self, action: SessionAction) {
        self.session.update(|s| s.reduce(action));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    info!("Using API at {}", config.api_base_url);
    let api = HttpApi::new(&config);
    provide_context(api.clone());

    let session = SessionContext {
        session: RwSignal::new(Session::default()),
    };
    provide_context(session);

    let (appearance, set_appearance) = signal(load_appearance());
    provide_context(AppearanceContext {
        appearance,
        set_appearance,
    });

    // Resolve who is signed in once on load
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            session::refresh_current_user(&api, &move |action| session.dispatch(action)).await;
        });
    });

    Effect::new(move |prev: Option<()>| {
        let a = appearance.get();
        apply_appearance(a);
        if prev.is_some() {
            save_appearance(a);
        }
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p class="page-message">"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/appointments") view=AppointmentsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
