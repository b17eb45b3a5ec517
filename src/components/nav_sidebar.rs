//! Navigation Sidebar Component
//!
//! Left column with a link per management page and the signed-in user.

use leptos::prelude::*;
use roomdesk_core::{Access, Session};

use crate::context::use_app_context;
use crate::routes::NAV_ROUTES;
use crate::store::{navigate, use_app_store, AppStateStoreFields};

#[component]
pub fn NavSidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // hide pages the current role cannot open
    let visible_routes = move || {
        ctx.session.with(|session: &Session| {
            NAV_ROUTES
                .iter()
                .copied()
                .filter(|route| session.access(route.required_role()) == Access::Granted)
                .collect::<Vec<_>>()
        })
    };

    let user_line = move || {
        ctx.session.with(|s| {
            s.user()
                .map(|u| format!("{} · {}", u.display_name(), u.role.label()))
                .unwrap_or_default()
        })
    };

    view! {
        <nav class="nav-sidebar">
            <div class="brand">"RoomDesk"</div>
            <ul class="nav-links">
                {move || visible_routes().into_iter().map(|route| {
                    let active = move || route.is_active(store.route().get());
                    view! {
                        <li>
                            <a
                                href="#"
                                class:active=active
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    navigate(&store, route);
                                }
                            >
                                {route.title()}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
            <div class="nav-user">
                <span class="user-name">{user_line}</span>
                <button type="button" class="logout-btn" on:click=move |_| ctx.sign_out()>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
