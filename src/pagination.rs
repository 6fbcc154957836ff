use crate::api::PageMeta;

/// View state for a Previous / "Page P of T" / Next control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    /// Clamps the server's page into `[1, total_pages]`.
    pub fn from_meta(meta: &PageMeta) -> Self {
        let page = if meta.total_pages == 0 {
            1
        } else {
            meta.page.clamp(1, meta.total_pages)
        };
        Self {
            page,
            total_pages: meta.total_pages,
        }
    }

    /// A single page (or no results at all) needs no control.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn previous(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
