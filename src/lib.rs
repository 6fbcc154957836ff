pub mod api;
pub mod appearance;
pub mod booking;
pub mod config;
pub mod error;
pub mod fetch_guard;
pub mod listing;
pub mod pagination;
pub mod schedule;
pub mod session;

mod app;
mod components;
mod pages;

use app::App;

/// Browser entry point.
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(App);
}
