//! Assets Page

use leptos::prelude::*;
use roomdesk_core::entities::{option_label, Asset, ASSET_CATEGORIES, ASSET_CONDITIONS};

use super::management::{management_page, ConfirmStyle, PageConfig};
use crate::models::{money, or_dash, Column, FilterSpec};

const FILTERS: &[FilterSpec] = &[
    FilterSpec::fixed("category", "Category", ASSET_CATEGORIES),
    FilterSpec::fixed("condition", "Condition", ASSET_CONDITIONS),
];

#[component]
pub fn AssetsPage() -> impl IntoView {
    management_page(PageConfig::<Asset> {
        noun: "asset",
        title: "Assets",
        columns: vec![
            Column::new("name", "Name", |a: &Asset| a.name.clone()),
            Column::new("category", "Category", |a: &Asset| option_label(ASSET_CATEGORIES, &a.category)),
            Column::new("room_number", "Room", |a: &Asset| or_dash(&a.room_number)),
            Column::new("quantity", "Qty", |a: &Asset| a.quantity.to_string()),
            Column::new("unit_price", "Unit price", |a: &Asset| money(a.unit_price)),
            Column::new("total_value", "Total", |a: &Asset| money(a.total_value())),
            Column::new("condition", "Condition", |a: &Asset| option_label(ASSET_CONDITIONS, &a.condition)),
        ],
        filters: FILTERS,
        confirm: ConfirmStyle::Native,
        detail: None,
    })
}
