//! Domain Entities
//!
//! Records served by the backend, one module per management page.
//! Status-like fields stay plain strings so unknown server values still
//! render; forms restrict input to the known options.

mod asset;
mod invoice;
mod maintenance;
mod package;
mod room;
mod tenant;

pub use asset::{Asset, ASSET_CATEGORIES, ASSET_CONDITIONS};
pub use invoice::{Invoice, INVOICE_STATUSES};
pub use maintenance::{MaintenanceRequest, MaintenanceSchedule, PRIORITIES, REQUEST_STATUSES, SCHEDULE_FREQUENCIES, SCHEDULE_STATUSES};
pub use package::{Package, PACKAGE_STATUSES};
pub use room::{Room, ROOM_STATUSES, ROOM_TYPES};
pub use tenant::{Tenant, TENANT_STATUSES};

/// Display label for `value` among `options`, falling back to the raw value
pub fn option_label(options: &[(&'static str, &'static str)], value: &str) -> String {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormModel;
    use crate::record::Record;

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(ROOM_STATUSES, "occupied"), "Occupied");
        assert_eq!(option_label(ROOM_STATUSES, "haunted"), "haunted");
    }

    fn assert_search_fields_exist<T: FormModel>(sample: &T) {
        for field in T::SEARCH_FIELDS {
            assert!(sample.field(field).is_some(), "{} has no field {}", T::RESOURCE, field);
        }
        for spec in T::schema().fields {
            assert!(sample.field(spec.name).is_some(), "{} form field {} is not listable", T::RESOURCE, spec.name);
        }
    }

    #[test]
    fn test_every_entity_exposes_its_fields() {
        assert_search_fields_exist(&Room::sample(1, "101", "North"));
        assert_search_fields_exist(&Tenant::sample(1, "Ada Lovelace"));
        assert_search_fields_exist(&Asset::sample(1, "Desk", 2));
        assert_search_fields_exist(&Invoice::sample(1, "INV-001", 120.0));
        assert_search_fields_exist(&MaintenanceRequest::sample(1, "Leaking tap"));
        assert_search_fields_exist(&MaintenanceSchedule::sample(1, "Boiler service"));
        assert_search_fields_exist(&Package::sample(1, "TRK123", "Ada Lovelace"));
    }

    #[test]
    fn test_draft_round_trips_through_payload() {
        let room = Room::sample(5, "305", "South");
        let draft = Room::schema().draft_from(&room);
        assert!(Room::schema().validate(&draft).is_empty());

        let mut body = Room::schema().payload(&draft);
        body["id"] = 5.into();
        let back: Room = serde_json::from_value(body).unwrap();
        assert_eq!(back, room);
    }
}
