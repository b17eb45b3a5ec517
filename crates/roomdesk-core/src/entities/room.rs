//! Room Entity

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const ROOM_STATUSES: &[(&str, &str)] = &[
    ("available", "Available"),
    ("occupied", "Occupied"),
    ("maintenance", "Under maintenance"),
    ("reserved", "Reserved"),
];

pub const ROOM_TYPES: &[(&str, &str)] = &[
    ("single", "Single"),
    ("double", "Double"),
    ("studio", "Studio"),
    ("suite", "Suite"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub room_number: String,
    pub building: String,
    pub floor: i32,
    pub room_type: String,
    pub status: String,
    pub monthly_rent: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

static ROOM_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("room_number", "Room number").required(),
        FieldSpec::text("building", "Building").required(),
        // basements are negative floors
        FieldSpec::new("floor", "Floor", FieldKind::Number { min: None, integer: true }).required(),
        FieldSpec::select("room_type", "Room type", ROOM_TYPES).required().with_default("single"),
        FieldSpec::select("status", "Status", ROOM_STATUSES).required().with_default("available"),
        FieldSpec::amount("monthly_rent", "Monthly rent").required(),
        FieldSpec::new("notes", "Notes", FieldKind::TextArea),
    ],
};

impl Record for Room {
    type Id = u32;
    const RESOURCE: &'static str = "rooms";
    const SEARCH_FIELDS: &'static [&'static str] = &["room_number", "building"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "room_number" => (&self.room_number).into(),
            "building" => (&self.building).into(),
            "floor" => self.floor.into(),
            "room_type" => (&self.room_type).into(),
            "status" => (&self.status).into(),
            "monthly_rent" => self.monthly_rent.into(),
            "notes" => (&self.notes).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for Room {
    fn schema() -> &'static FormSchema {
        &ROOM_FORM
    }
}

#[cfg(test)]
impl Room {
    /// Room whose floor is the first digit of its number
    pub(crate) fn sample(id: u32, room_number: &str, building: &str) -> Self {
        let floor = room_number
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0) as i32;
        Self {
            id,
            room_number: room_number.to_string(),
            building: building.to_string(),
            floor,
            room_type: "single".to_string(),
            status: "available".to_string(),
            monthly_rent: 500.0,
            notes: None,
        }
    }
}
