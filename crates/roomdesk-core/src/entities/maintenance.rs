//! Maintenance Entities
//!
//! Ad-hoc repair requests and recurring service schedules.

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const PRIORITIES: &[(&str, &str)] = &[
    ("low", "Low"),
    ("medium", "Medium"),
    ("high", "High"),
    ("urgent", "Urgent"),
];

pub const REQUEST_STATUSES: &[(&str, &str)] = &[
    ("open", "Open"),
    ("in_progress", "In progress"),
    ("resolved", "Resolved"),
    ("cancelled", "Cancelled"),
];

pub const SCHEDULE_FREQUENCIES: &[(&str, &str)] = &[
    ("weekly", "Weekly"),
    ("monthly", "Monthly"),
    ("quarterly", "Quarterly"),
    ("yearly", "Yearly"),
    ("custom", "Custom interval"),
];

pub const SCHEDULE_STATUSES: &[(&str, &str)] = &[("active", "Active"), ("paused", "Paused")];

// ========================
// Requests
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub room_number: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub reported_on: Option<String>,
}

static REQUEST_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("title", "Title").required(),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::text("room_number", "Room number").required(),
        FieldSpec::select("priority", "Priority", PRIORITIES).required().with_default("medium"),
        FieldSpec::select("status", "Status", REQUEST_STATUSES).required().with_default("open"),
        FieldSpec::new("reported_on", "Reported on", FieldKind::Date),
    ],
};

impl Record for MaintenanceRequest {
    type Id = u32;
    const RESOURCE: &'static str = "maintenance/requests";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "room_number"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "title" => (&self.title).into(),
            "description" => (&self.description).into(),
            "room_number" => (&self.room_number).into(),
            "priority" => (&self.priority).into(),
            // urgency order rather than alphabetical
            "priority_rank" => (PRIORITIES.iter().position(|(v, _)| *v == self.priority).unwrap_or(0) as u32).into(),
            "status" => (&self.status).into(),
            "reported_on" => (&self.reported_on).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for MaintenanceRequest {
    fn schema() -> &'static FormSchema {
        &REQUEST_FORM
    }
}

// ========================
// Schedules
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub asset_name: Option<String>,
    pub frequency: String,
    #[serde(default)]
    pub interval_days: Option<u32>,
    pub next_due: String,
    pub status: String,
}

static SCHEDULE_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("title", "Title").required(),
        FieldSpec::text("asset_name", "Asset"),
        FieldSpec::select("frequency", "Frequency", SCHEDULE_FREQUENCIES).required().with_default("monthly"),
        FieldSpec::new("interval_days", "Interval (days)", FieldKind::Number { min: Some(1.0), integer: true }),
        FieldSpec::new("next_due", "Next due", FieldKind::Date).required(),
        FieldSpec::select("status", "Status", SCHEDULE_STATUSES).required().with_default("active"),
    ],
};

impl Record for MaintenanceSchedule {
    type Id = u32;
    const RESOURCE: &'static str = "maintenance/schedules";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "asset_name"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "title" => (&self.title).into(),
            "asset_name" => (&self.asset_name).into(),
            "frequency" => (&self.frequency).into(),
            "interval_days" => (&self.interval_days).into(),
            "next_due" => (&self.next_due).into(),
            "status" => (&self.status).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for MaintenanceSchedule {
    fn schema() -> &'static FormSchema {
        &SCHEDULE_FORM
    }
}

#[cfg(test)]
impl MaintenanceRequest {
    pub(crate) fn sample(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: None,
            room_number: "101".to_string(),
            priority: "medium".to_string(),
            status: "open".to_string(),
            reported_on: Some("2026-10-01".to_string()),
        }
    }
}

#[cfg(test)]
impl MaintenanceSchedule {
    pub(crate) fn sample(id: u32, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            asset_name: Some("Boiler".to_string()),
            frequency: "monthly".to_string(),
            interval_days: None,
            next_due: "2026-11-01".to_string(),
            status: "active".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{apply_query, ListQuery, SortDirection};

    #[test]
    fn test_priority_rank_sorts_by_urgency() {
        let mut urgent = MaintenanceRequest::sample(1, "Flood");
        urgent.priority = "urgent".into();
        let mut low = MaintenanceRequest::sample(2, "Squeaky door");
        low.priority = "low".into();
        let medium = MaintenanceRequest::sample(3, "Broken blind");

        let mut query = ListQuery::new(10);
        query.sort_key = Some("priority_rank".into());
        query.sort_direction = SortDirection::Descending;
        assert_eq!(apply_query(&[low, urgent, medium], &query).ids(), vec![1, 3, 2]);
    }

    #[test]
    fn test_interval_must_be_positive() {
        let mut draft = MaintenanceSchedule::schema().draft_from(&MaintenanceSchedule::sample(1, "Filters"));
        draft.set("interval_days", "0");
        let errors = MaintenanceSchedule::schema().validate(&draft);
        assert_eq!(errors.get("interval_days").map(String::as_str), Some("Interval (days) must be at least 1"));
    }
}
