//! Invoices Page

use leptos::prelude::*;
use roomdesk_core::entities::{option_label, Invoice, INVOICE_STATUSES};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{money, Column, FilterSpec};

const FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("status", "Status", INVOICE_STATUSES),
    FilterSpec::distinct("room_number", "Room"),
];

#[component]
pub fn InvoicesPage() -> impl IntoView {
    management_page(PageConfig::<Invoice> {
        noun: "invoice",
        title: "Invoices",
        columns: vec![
            Column::new("invoice_number", "Invoice", |i: &Invoice| i.invoice_number.clone()),
            Column::new("tenant_name", "Tenant", |i: &Invoice| i.tenant_name.clone()),
            Column::new("room_number", "Room", |i: &Invoice| i.room_number.clone()),
            Column::new("units", "Units", |i: &Invoice| i.units.map(|u| u.to_string()).unwrap_or_else(|| "-".to_string())),
            Column::new("amount", "Amount", |i: &Invoice| money(i.amount)),
            Column::new("due_date", "Due", |i: &Invoice| i.due_date.clone()),
            Column::new("status", "Status", |i: &Invoice| option_label(INVOICE_STATUSES, &i.status)),
        ],
        filters: FILTERS,
        confirm: ConfirmStyle::Native,
        detail: None,
    })
}
