//! Packages Page
//!
//! Only reachable by super admins; the route guard enforces it.

use leptos::prelude::*;
use roomdesk_core::entities::{option_label, Package, PACKAGE_STATUSES};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{or_dash, Column, FilterSpec};

const FILTERS: &[FilterSpec] = &[FilterSpec::fixed("status", "Status", PACKAGE_STATUSES)];

#[component]
pub fn PackagesPage() -> impl IntoView {
    management_page(PageConfig::<Package> {
        noun: "package",
        title: "Packages",
        columns: vec![
            Column::new("tracking_number", "Tracking #", |p: &Package| p.tracking_number.clone()),
            Column::new("recipient", "Recipient", |p: &Package| p.recipient.clone()),
            Column::new("room_number", "Room", |p: &Package| or_dash(&p.room_number)),
            Column::new("carrier", "Carrier", |p: &Package| or_dash(&p.carrier)),
            Column::new("status", "Status", |p: &Package| option_label(PACKAGE_STATUSES, &p.status)),
            Column::new("received_on", "Received", |p: &Package| p.received_on.clone()),
        ],
        filters: FILTERS,
        confirm: ConfirmStyle::Native,
        detail: None,
    })
}
