//! Room Detail Page
//!
//! A single room with the tenants and assets recorded against it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use roomdesk_core::entities::{option_label, Asset, Room, Tenant, ROOM_STATUSES, ROOM_TYPES};
use roomdesk_core::{ApiError, ListParams, RecordApi};

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::models::{money, or_dash};
use crate::routes::Route;
use crate::store::{navigate, use_app_store};

fn by_room(room_number: &str) -> ListParams {
    let mut params = ListParams::default();
    params.filters.insert("room_number".to_string(), room_number.to_string());
    params
}

#[component]
pub fn RoomDetailPage(id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (room, set_room) = signal::<Option<Room>>(None);
    let (tenants, set_tenants) = signal(Vec::<Tenant>::new());
    let (assets, set_assets) = signal(Vec::<Asset>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let rooms = ctx.records::<Room>();
        let tenant_api = ctx.records::<Tenant>();
        let asset_api = ctx.records::<Asset>();
        spawn_local(async move {
            let result = rooms.get(&id).await;
            ctx.check(&result);
            match result {
                Ok(found) => {
                    let number = found.room_number.clone();
                    let params = by_room(&number);
                    set_room.try_set(Some(found));
                    // related lists are secondary; failures only hide them
                    match tenant_api.list(&params).await {
                        Ok(mut list) => {
                            // the server may ignore the filter
                            list.retain(|t| t.room_number.as_deref() == Some(number.as_str()));
                            set_tenants.try_set(list);
                        }
                        Err(e) => log::warn!("tenants for room {} unavailable: {}", id, e),
                    }
                    match asset_api.list(&params).await {
                        Ok(mut list) => {
                            list.retain(|a| a.room_number.as_deref() == Some(number.as_str()));
                            set_assets.try_set(list);
                        }
                        Err(e) => log::warn!("assets for room {} unavailable: {}", id, e),
                    }
                }
                Err(ApiError::NotFound { .. }) => {
                    set_error.try_set(Some(format!("Room #{} was not found. It may have been deleted.", id)));
                }
                Err(e) => {
                    set_error.try_set(Some(e.user_message()));
                }
            }
            set_loading.try_set(false);
        });
    };

    Effect::new(move |_| load());

    let details = move || {
        room.get().map(|r| {
            view! {
                <dl class="room-details">
                    <dt>"Building"</dt><dd>{r.building.clone()}</dd>
                    <dt>"Floor"</dt><dd>{r.floor}</dd>
                    <dt>"Type"</dt><dd>{option_label(ROOM_TYPES, &r.room_type)}</dd>
                    <dt>"Status"</dt><dd>{option_label(ROOM_STATUSES, &r.status)}</dd>
                    <dt>"Monthly rent"</dt><dd>{money(r.monthly_rent)}</dd>
                    <dt>"Notes"</dt><dd>{or_dash(&r.notes)}</dd>
                </dl>
            }
        })
    };

    view! {
        <section class="room-detail-page">
            <header class="page-header">
                <button type="button" class="back-btn" on:click=move |_| navigate(&store, Route::Rooms)>
                    "‹ Rooms"
                </button>
                <h2>{move || room.get().map(|r| format!("Room {}", r.room_number)).unwrap_or_else(|| format!("Room #{}", id))}</h2>
            </header>

            <ErrorBanner
                message=error
                on_dismiss=move |_: ()| set_error.set(None)
                on_retry=Callback::new(move |_: ()| load())
            />

            <Show when=move || loading.get()>
                <div class="loading">"Loading…"</div>
            </Show>

            {details}

            <Show when=move || room.get().is_some()>
                <h3>"Tenants"</h3>
                <ul class="related-list">
                    {move || if tenants.get().is_empty() {
                        view! { <li class="empty">"No tenants in this room."</li> }.into_any()
                    } else {
                        tenants.get().into_iter().map(|t| view! {
                            <li>{t.full_name} " · " {t.email}</li>
                        }).collect_view().into_any()
                    }}
                </ul>
                <h3>"Assets"</h3>
                <ul class="related-list">
                    {move || if assets.get().is_empty() {
                        view! { <li class="empty">"No assets recorded."</li> }.into_any()
                    } else {
                        assets.get().into_iter().map(|a| view! {
                            <li>{format!("{} × {}", a.quantity, a.name)}</li>
                        }).collect_view().into_any()
                    }}
                </ul>
            </Show>
        </section>
    }
}
