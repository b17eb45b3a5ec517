//! Data Table
//!
//! Sortable table over the visible page of an `AdminPage`, with a
//! checkbox column and per-row actions. Generic over the entity, so it is
//! a plain view function rather than a `#[component]`.

use leptos::prelude::*;
use roomdesk_core::{AdminPage, Record, SortDirection};

use crate::models::{Column, Entity};

/// Per-row action callbacks, each receiving the record id
#[derive(Clone, Copy)]
pub struct RowActions {
    pub on_edit: Callback<u32>,
    pub on_delete: Callback<u32>,
    pub on_open: Option<Callback<u32>>,
}

fn sort_marker(key: &str, sort_key: Option<&str>, direction: SortDirection) -> &'static str {
    match (sort_key == Some(key), direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ▲",
        (true, SortDirection::Descending) => " ▼",
    }
}

pub fn data_table<T: Entity>(
    page: RwSignal<AdminPage<T>>,
    columns: Vec<Column<T>>,
    actions: RowActions,
) -> impl IntoView {
    let header_columns = columns.clone();
    let span = columns.len() + 2;

    let header = header_columns
        .into_iter()
        .map(|column| {
            let key = column.key;
            let marker = move || {
                page.with(|p| {
                    let query = p.list().query();
                    sort_marker(key, query.sort_key.as_deref(), query.sort_direction)
                })
            };
            if column.sortable {
                view! {
                    <th class="sortable" on:click=move |_| page.update(|p| p.set_sort(key))>
                        {column.label}{marker}
                    </th>
                }
                .into_any()
            } else {
                view! { <th>{column.label}</th> }.into_any()
            }
        })
        .collect_view();

    let rows = move || {
        let visible = page.with(|p| p.list().view());
        if visible.is_empty() {
            let text = if visible.total == 0 { "Nothing here yet." } else { "No records match the current search." };
            return view! {
                <tr class="empty-row"><td colspan=span.to_string()>{text}</td></tr>
            }
            .into_any();
        }
        visible.rows
            .into_iter()
            .map(|record| {
                let id = record.id();
                let checked = move || page.with(|p| p.list().selection().contains(&id));
                let cells = columns
                    .iter()
                    .map(|column| view! { <td>{(column.render)(&record)}</td> })
                    .collect_view();
                view! {
                    <tr class:selected=checked>
                        <td class="select-cell">
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |_| {
                                    page.update(|p| {
                                        p.toggle_select(id);
                                    });
                                }
                            />
                        </td>
                        {cells}
                        <td class="row-actions">
                            {actions.on_open.map(|open| view! {
                                <button type="button" class="open-btn" on:click=move |_| open.run(id)>"View"</button>
                            })}
                            <button type="button" class="edit-btn" on:click=move |_| actions.on_edit.run(id)>"Edit"</button>
                            <button type="button" class="delete-btn" on:click=move |_| actions.on_delete.run(id)>"Delete"</button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th class="select-cell">
                        <input
                            type="checkbox"
                            title="Select all on this page"
                            prop:checked=move || page.with(|p| !p.list().view().is_empty() && p.list().all_visible_selected())
                            on:change=move |_| page.update(|p| p.toggle_select_all())
                        />
                    </th>
                    {header}
                    <th class="row-actions">"Actions"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
