//! Routes
//!
//! In-app navigation targets. The current route lives in the app store.

use roomdesk_core::Role;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Login,
    Rooms,
    RoomDetail(u32),
    Tenants,
    Assets,
    Invoices,
    MaintenanceRequests,
    MaintenanceSchedules,
    Packages,
}

/// Sidebar entries in display order
pub const NAV_ROUTES: &[Route] = &[
    Route::Rooms,
    Route::Tenants,
    Route::Assets,
    Route::Invoices,
    Route::MaintenanceRequests,
    Route::MaintenanceSchedules,
    Route::Packages,
];

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Rooms => "Rooms",
            Route::RoomDetail(_) => "Room",
            Route::Tenants => "Tenants",
            Route::Assets => "Assets",
            Route::Invoices => "Invoices",
            Route::MaintenanceRequests => "Maintenance requests",
            Route::MaintenanceSchedules => "Maintenance schedules",
            Route::Packages => "Packages",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Minimum role beyond being signed in
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Packages => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Whether the sidebar entry for `self` is highlighted on `current`
    pub fn is_active(&self, current: Route) -> bool {
        *self == current || matches!((self, current), (Route::Rooms, Route::RoomDetail(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_login_is_public() {
        assert!(!Route::Login.requires_auth());
        assert!(NAV_ROUTES.iter().all(Route::requires_auth));
        assert!(Route::RoomDetail(3).requires_auth());
    }

    #[test]
    fn test_packages_need_super_admin() {
        assert_eq!(Route::Packages.required_role(), Some(Role::SuperAdmin));
        assert_eq!(Route::Invoices.required_role(), None);
    }

    #[test]
    fn test_room_detail_highlights_rooms() {
        assert!(Route::Rooms.is_active(Route::RoomDetail(9)));
        assert!(!Route::Tenants.is_active(Route::RoomDetail(9)));
    }
}
