use leptos::prelude::*;
use tracing::warn;

const STORAGE_KEY: &str = "theme";

/// Light/dark preference. `System` defers to the OS via CSS `@media`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Appearance {
    #[default]
    System,
    Light,
    Dark,
}

impl Appearance {
    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Appearance::Light,
            "dark" => Appearance::Dark,
            _ => Appearance::System,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::System => "system",
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }

    /// Order used by the navbar toggle.
    pub fn cycle(self) -> Self {
        match self {
            Appearance::System => Appearance::Light,
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::System,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Appearance::System => "Auto",
            Appearance::Light => "Light",
            Appearance::Dark => "Dark",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppearanceContext {
    pub appearance: ReadSignal<Appearance>,
    pub set_appearance: WriteSignal<Appearance>,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_appearance() -> Appearance {
    local_storage()
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
        .map(|saved| Appearance::parse(&saved))
        .unwrap_or_default()
}

pub fn save_appearance(appearance: Appearance) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, appearance.as_str()) {
        warn!("Failed to save appearance preference: {:?}", e);
    }
}

/// Set or remove the `data-theme` attribute on `<html>`.
pub fn apply_appearance(appearance: Appearance) {
    let Some(html) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    match appearance {
        Appearance::Light | Appearance::Dark => {
            let _ = html.set_attribute("data-theme", appearance.as_str());
        }
        Appearance::System => {
            let _ = html.remove_attribute("data-theme");
        }
    }
}
