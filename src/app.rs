//! RoomDesk Frontend App
//!
//! Sidebar plus the current route, behind the session guard.

use leptos::prelude::*;
use reactive_stores::Store;
use roomdesk_core::{Access, AppConfig, Session};

use crate::components::NavSidebar;
use crate::context::AppContext;
use crate::pages::{
    AssetsPage, InvoicesPage, LoginPage, MaintenanceRequestsPage, MaintenanceSchedulesPage, PackagesPage, RoomDetailPage,
    RoomsPage, TenantsPage,
};
use crate::routes::Route;
use crate::storage::LocalStore;
use crate::store::{redirect_to_login, AppState, AppStateStoreFields};

fn route_view(route: Route) -> AnyView {
    match route {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Rooms => view! { <RoomsPage /> }.into_any(),
        Route::RoomDetail(id) => view! { <RoomDetailPage id=id /> }.into_any(),
        Route::Tenants => view! { <TenantsPage /> }.into_any(),
        Route::Assets => view! { <AssetsPage /> }.into_any(),
        Route::Invoices => view! { <InvoicesPage /> }.into_any(),
        Route::MaintenanceRequests => view! { <MaintenanceRequestsPage /> }.into_any(),
        Route::MaintenanceSchedules => view! { <MaintenanceSchedulesPage /> }.into_any(),
        Route::Packages => view! { <PackagesPage /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = Session::restore(&LocalStore);
    let store = Store::new(AppState {
        route: if session.is_authenticated() { Route::Rooms } else { Route::Login },
        ..Default::default()
    });
    let ctx = AppContext::new(config, session, store);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Re-check a restored token once on boot
    Effect::new(move |_| ctx.verify_session());

    let route = Memo::new(move |_| store.route().get());
    let access = Memo::new(move |_| {
        let route = route.get();
        if route.requires_auth() {
            ctx.session.with(|s| s.access(route.required_role()))
        } else {
            Access::Granted
        }
    });
    let signed_in = Memo::new(move |_| ctx.session.with(Session::is_authenticated));

    // Unauthenticated visits to a guarded page land on the login form
    Effect::new(move |_| {
        if access.get() == Access::RedirectToLogin {
            redirect_to_login(&store, route.get_untracked());
        }
    });

    let content = move || match access.get() {
        Access::Granted => route_view(route.get()),
        Access::RedirectToLogin => view! { <LoginPage /> }.into_any(),
        Access::Forbidden => view! {
            <section class="forbidden">
                <h2>"Access denied"</h2>
                <p>"Your account cannot open this page."</p>
            </section>
        }
        .into_any(),
    };

    view! {
        <div class="app-layout">
            <Show when=move || signed_in.get()>
                <NavSidebar />
            </Show>
            <main class="main-content">
                {move || {
                    let notice = store.notice().get();
                    // the login page renders the notice itself
                    notice.filter(|_| route.get() != Route::Login).map(|text| view! { <p class="notice">{text}</p> })
                }}
                {content}
            </main>
        </div>
    }
}
