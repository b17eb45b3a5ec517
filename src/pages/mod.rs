//! Pages
//!
//! One module per route.

mod assets;
mod invoices;
mod login;
mod maintenance;
mod management;
mod packages;
mod room_detail;
mod rooms;
mod tenants;

pub use assets::AssetsPage;
pub use invoices::InvoicesPage;
pub use login::LoginPage;
pub use maintenance::{MaintenanceRequestsPage, MaintenanceSchedulesPage};
pub use packages::PackagesPage;
pub use room_detail::RoomDetailPage;
pub use rooms::RoomsPage;
pub use tenants::TenantsPage;
