//! Tenant Entity

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const TENANT_STATUSES: &[(&str, &str)] = &[
    ("active", "Active"),
    ("pending", "Pending move-in"),
    ("moved_out", "Moved out"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: u32,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub move_in_date: Option<String>,
}

static TENANT_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("full_name", "Full name").required(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::text("phone", "Phone"),
        FieldSpec::text("room_number", "Room number"),
        FieldSpec::select("status", "Status", TENANT_STATUSES).required().with_default("active"),
        FieldSpec::new("move_in_date", "Move-in date", FieldKind::Date),
    ],
};

impl Record for Tenant {
    type Id = u32;
    const RESOURCE: &'static str = "tenants";
    const SEARCH_FIELDS: &'static [&'static str] = &["full_name", "email", "phone"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "full_name" => (&self.full_name).into(),
            "email" => (&self.email).into(),
            "phone" => (&self.phone).into(),
            "room_number" => (&self.room_number).into(),
            "status" => (&self.status).into(),
            "move_in_date" => (&self.move_in_date).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for Tenant {
    fn schema() -> &'static FormSchema {
        &TENANT_FORM
    }
}

#[cfg(test)]
impl Tenant {
    pub(crate) fn sample(id: u32, full_name: &str) -> Self {
        let login = full_name.to_lowercase().replace(' ', ".");
        Self {
            id,
            full_name: full_name.to_string(),
            email: format!("{}@example.com", login),
            phone: Some("555-0100".to_string()),
            room_number: Some("101".to_string()),
            status: "active".to_string(),
            move_in_date: Some("2026-01-15".to_string()),
        }
    }
}
