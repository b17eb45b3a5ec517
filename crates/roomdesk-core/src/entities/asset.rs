//! Asset Entity
//!
//! Furniture and equipment tracked per room.

use serde::{Deserialize, Serialize};

use crate::form::{FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const ASSET_CATEGORIES: &[(&str, &str)] = &[
    ("furniture", "Furniture"),
    ("appliance", "Appliance"),
    ("electronics", "Electronics"),
    ("fixture", "Fixture"),
    ("other", "Other"),
];

pub const ASSET_CONDITIONS: &[(&str, &str)] = &[
    ("new", "New"),
    ("good", "Good"),
    ("fair", "Fair"),
    ("poor", "Poor"),
    ("broken", "Broken"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u32,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub room_number: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    pub condition: String,
}

impl Asset {
    pub fn total_value(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

static ASSET_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("name", "Name").required(),
        FieldSpec::select("category", "Category", ASSET_CATEGORIES).required(),
        FieldSpec::text("room_number", "Room number"),
        FieldSpec::count("quantity", "Quantity").required().with_default("1"),
        FieldSpec::amount("unit_price", "Unit price").required().with_default("0"),
        FieldSpec::select("condition", "Condition", ASSET_CONDITIONS).required().with_default("good"),
    ],
};

impl Record for Asset {
    type Id = u32;
    const RESOURCE: &'static str = "assets";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "category", "room_number"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "category" => (&self.category).into(),
            "room_number" => (&self.room_number).into(),
            "quantity" => self.quantity.into(),
            "unit_price" => self.unit_price.into(),
            "total_value" => self.total_value().into(),
            "condition" => (&self.condition).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for Asset {
    fn schema() -> &'static FormSchema {
        &ASSET_FORM
    }
}

#[cfg(test)]
impl Asset {
    pub(crate) fn sample(id: u32, name: &str, quantity: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: "furniture".to_string(),
            room_number: Some("101".to_string()),
            quantity,
            unit_price: 25.0,
            condition: "good".to_string(),
        }
    }
}
