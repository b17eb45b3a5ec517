//! Maintenance Pages
//!
//! Requests and recurring schedules share a module; they are separate
//! routes with separate list state.

use leptos::prelude::*;
use roomdesk_core::entities::{
    option_label, MaintenanceRequest, MaintenanceSchedule, PRIORITIES, REQUEST_STATUSES, SCHEDULE_FREQUENCIES,
    SCHEDULE_STATUSES,
};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{or_dash, Column, FilterSpec};

const REQUEST_FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("status", "Status", REQUEST_STATUSES),
    FilterSpec::fixed("priority", "Priority", PRIORITIES),
];

const SCHEDULE_FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("frequency", "Frequency", SCHEDULE_FREQUENCIES),
    FilterSpec::fixed("status", "Status", SCHEDULE_STATUSES),
];

#[component]
pub fn MaintenanceRequestsPage() -> impl IntoView {
    management_page(PageConfig::<MaintenanceRequest> {
        noun: "request",
        title: "Maintenance requests",
        columns: vec![
            Column::new("title", "Title", |r: &MaintenanceRequest| r.title.clone()),
            Column::new("room_number", "Room", |r: &MaintenanceRequest| r.room_number.clone()),
            // sorts by urgency rather than by label
            Column::new("priority_rank", "Priority", |r: &MaintenanceRequest| option_label(PRIORITIES, &r.priority)),
            Column::new("status", "Status", |r: &MaintenanceRequest| option_label(REQUEST_STATUSES, &r.status)),
            Column::new("reported_on", "Reported", |r: &MaintenanceRequest| or_dash(&r.reported_on)),
        ],
        filters: REQUEST_FILTERS,
        confirm: ConfirmStyle::Modal,
        detail: None,
    })
}

#[component]
pub fn MaintenanceSchedulesPage() -> impl IntoView {
    management_page(PageConfig::<MaintenanceSchedule> {
        noun: "schedule",
        title: "Maintenance schedules",
        columns: vec![
            Column::new("title", "Title", |s: &MaintenanceSchedule| s.title.clone()),
            Column::new("asset_name", "Asset", |s: &MaintenanceSchedule| or_dash(&s.asset_name)),
            Column::new("frequency", "Frequency", |s: &MaintenanceSchedule| match (s.frequency.as_str(), s.interval_days) {
                ("custom", Some(days)) => format!("Every {} days", days),
                (frequency, _) => option_label(SCHEDULE_FREQUENCIES, frequency),
            }),
            Column::new("next_due", "Next due", |s: &MaintenanceSchedule| s.next_due.clone()),
            Column::new("status", "Status", |s: &MaintenanceSchedule| option_label(SCHEDULE_STATUSES, &s.status)),
        ],
        filters: SCHEDULE_FILTERS,
        confirm: ConfirmStyle::Modal,
        detail: None,
    })
}
