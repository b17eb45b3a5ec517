//! Tenants Page

use leptos::prelude::*;
use roomdesk_core::entities::{option_label, Tenant, TENANT_STATUSES};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{or_dash, Column, FilterSpec};

const FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("status", "Status", TENANT_STATUSES),
    FilterSpec::distinct("room_number", "Room"),
];

#[component]
pub fn TenantsPage() -> impl IntoView {
    management_page(PageConfig::<Tenant> {
        noun: "tenant",
        title: "Tenants",
        columns: vec![
            Column::new("full_name", "Name", |t: &Tenant| t.full_name.clone()),
            Column::new("email", "Email", |t: &Tenant| t.email.clone()),
            Column::new("phone", "Phone", |t: &Tenant| or_dash(&t.phone)).unsorted(),
            Column::new("room_number", "Room", |t: &Tenant| or_dash(&t.room_number)),
            Column::new("status", "Status", |t: &Tenant| option_label(TENANT_STATUSES, &t.status)),
            Column::new("move_in_date", "Moved in", |t: &Tenant| or_dash(&t.move_in_date)),
        ],
        filters: FILTERS,
        confirm: ConfirmStyle::Modal,
        detail: None,
    })
}
