//! Package Entity
//!
//! Parcels received at the front desk on behalf of tenants.

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const PACKAGE_STATUSES: &[(&str, &str)] = &[
    ("pending", "Awaiting pickup"),
    ("picked_up", "Picked up"),
    ("returned", "Returned to sender"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: u32,
    pub tracking_number: String,
    pub recipient: String,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    pub status: String,
    pub received_on: String,
}

static PACKAGE_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("tracking_number", "Tracking number").required(),
        FieldSpec::text("recipient", "Recipient").required(),
        FieldSpec::text("room_number", "Room number"),
        FieldSpec::text("carrier", "Carrier"),
        FieldSpec::select("status", "Status", PACKAGE_STATUSES).required().with_default("pending"),
        FieldSpec::new("received_on", "Received on", FieldKind::Date).required(),
    ],
};

impl Record for Package {
    type Id = u32;
    const RESOURCE: &'static str = "packages";
    const SEARCH_FIELDS: &'static [&'static str] = &["tracking_number", "recipient", "carrier"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "tracking_number" => (&self.tracking_number).into(),
            "recipient" => (&self.recipient).into(),
            "room_number" => (&self.room_number).into(),
            "carrier" => (&self.carrier).into(),
            "status" => (&self.status).into(),
            "received_on" => (&self.received_on).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for Package {
    fn schema() -> &'static FormSchema {
        &PACKAGE_FORM
    }
}

#[cfg(test)]
impl Package {
    pub(crate) fn sample(id: u32, tracking_number: &str, recipient: &str) -> Self {
        Self {
            id,
            tracking_number: tracking_number.to_string(),
            recipient: recipient.to_string(),
            room_number: Some("101".to_string()),
            carrier: Some("DHL".to_string()),
            status: "pending".to_string(),
            received_on: "2026-10-10".to_string(),
        }
    }
}
