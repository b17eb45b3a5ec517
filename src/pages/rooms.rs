//! Rooms Page

use leptos::prelude::*;
use roomdesk_core::entities::{option_label, Room, ROOM_STATUSES, ROOM_TYPES};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{money, Column, FilterSpec};
use crate::routes::Route;

const FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("status", "Status", ROOM_STATUSES),
    FilterSpec::distinct("building", "Building"),
    FilterSpec::distinct("floor", "Floor"),
];

#[component]
pub fn RoomsPage() -> impl IntoView {
    management_page(PageConfig::<Room> {
        noun: "room",
        title: "Rooms",
        columns: vec![
            Column::new("room_number", "Room", |r: &Room| r.room_number.clone()),
            Column::new("building", "Building", |r: &Room| r.building.clone()),
            Column::new("floor", "Floor", |r: &Room| r.floor.to_string()),
            Column::new("room_type", "Type", |r: &Room| option_label(ROOM_TYPES, &r.room_type)),
            Column::new("status", "Status", |r: &Room| option_label(ROOM_STATUSES, &r.status)),
            Column::new("monthly_rent", "Rent", |r: &Room| money(r.monthly_rent)),
        ],
        filters: FILTERS,
        confirm: ConfirmStyle::Modal,
        detail: Some(Route::RoomDetail),
    })
}
