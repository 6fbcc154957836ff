use std::collections::BTreeSet;

pub const PAGE_SIZE: u32 = 10;

/// What the professional listing is currently showing: the active theme
/// filters (by slug) and the requested page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub themes: BTreeSet<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            themes: BTreeSet::new(),
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    /// Add or remove a theme filter. Any change to the filter starts over at page 1.
    pub fn toggle_theme(&mut self, slug: &str) {
        if !self.themes.remove(slug) {
            self.themes.insert(slug.to_string());
        }
        self.page = 1;
    }

    pub fn is_active(&self, slug: &str) -> bool {
        self.themes.contains(slug)
    }

    pub fn is_filtered(&self) -> bool {
        !self.themes.is_empty()
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Comma-joined slugs in stable order, or `None` when unfiltered.
    pub fn themes_param(&self) -> Option<String> {
        self.is_filtered()
            .then(|| self.themes.iter().cloned().collect::<Vec<_>>().join(","))
    }
}
