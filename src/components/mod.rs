pub mod navbar;
pub mod pagination;
pub mod professional_card;
pub mod professional_modal;
pub mod status_badge;
