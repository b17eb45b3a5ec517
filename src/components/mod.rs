//! UI Components
//!
//! Reusable Leptos components. The table and form modal are generic over
//! the entity and exposed as view functions.

mod confirm_modal;
mod data_table;
mod error_banner;
mod filter_select;
mod form_modal;
mod nav_sidebar;
mod pagination;
mod search_bar;

pub use confirm_modal::ConfirmModal;
pub use data_table::{data_table, RowActions};
pub use error_banner::ErrorBanner;
pub use filter_select::FilterSelect;
pub use form_modal::form_modal;
pub use nav_sidebar::NavSidebar;
pub use pagination::Pagination;
pub use search_bar::SearchBar;
