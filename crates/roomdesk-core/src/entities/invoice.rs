//! Invoice Entity
//!
//! Utility and rent invoices. `units` is metered consumption.

use serde::{Deserialize, Serialize};

use crate::form::{FieldKind, FieldSpec, FormModel, FormSchema};
use crate::record::{FieldValue, Record};

pub const INVOICE_STATUSES: &[(&str, &str)] = &[
    ("unpaid", "Unpaid"),
    ("paid", "Paid"),
    ("overdue", "Overdue"),
    ("void", "Void"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub invoice_number: String,
    pub tenant_name: String,
    pub room_number: String,
    #[serde(default)]
    pub units: Option<f64>,
    pub amount: f64,
    pub due_date: String,
    pub status: String,
}

static INVOICE_FORM: FormSchema = FormSchema {
    fields: &[
        FieldSpec::text("invoice_number", "Invoice number").required(),
        FieldSpec::text("tenant_name", "Tenant").required(),
        FieldSpec::text("room_number", "Room number").required(),
        FieldSpec::amount("units", "Units"),
        FieldSpec::amount("amount", "Amount").required(),
        FieldSpec::new("due_date", "Due date", FieldKind::Date).required(),
        FieldSpec::select("status", "Status", INVOICE_STATUSES).required().with_default("unpaid"),
    ],
};

impl Record for Invoice {
    type Id = u32;
    const RESOURCE: &'static str = "invoices";
    const SEARCH_FIELDS: &'static [&'static str] = &["invoice_number", "tenant_name", "room_number"];

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "invoice_number" => (&self.invoice_number).into(),
            "tenant_name" => (&self.tenant_name).into(),
            "room_number" => (&self.room_number).into(),
            "units" => (&self.units).into(),
            "amount" => self.amount.into(),
            "due_date" => (&self.due_date).into(),
            "status" => (&self.status).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl FormModel for Invoice {
    fn schema() -> &'static FormSchema {
        &INVOICE_FORM
    }
}

#[cfg(test)]
impl Invoice {
    pub(crate) fn sample(id: u32, invoice_number: &str, amount: f64) -> Self {
        Self {
            id,
            invoice_number: invoice_number.to_string(),
            tenant_name: "Ada Lovelace".to_string(),
            room_number: "101".to_string(),
            units: Some(42.0),
            amount,
            due_date: "2026-11-01".to_string(),
            status: "unpaid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_units_blocked_client_side() {
        let mut draft = Invoice::schema().draft_from(&Invoice::sample(1, "INV-1", 10.0));
        draft.set("units", "-4");
        let errors = Invoice::schema().validate(&draft);
        assert_eq!(errors.get("units").map(String::as_str), Some("Units cannot be negative"));
    }

    #[test]
    fn test_units_are_optional() {
        let mut draft = Invoice::schema().draft_from(&Invoice::sample(1, "INV-1", 10.0));
        draft.set("units", "");
        assert!(Invoice::schema().validate(&draft).is_empty());
        assert_eq!(Invoice::schema().payload(&draft)["units"], serde_json::Value::Null);
    }
}
