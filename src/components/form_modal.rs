//! Form Modal
//!
//! Create/edit dialog rendered from the entity's `FormSchema`.

use leptos::prelude::*;
use roomdesk_core::{AdminPage, FieldKind, FieldSpec, FormMode, FormModel};

use crate::models::Entity;

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Date => "date",
        FieldKind::Number { .. } => "number",
        _ => "text",
    }
}

fn field_control<T: Entity>(page: RwSignal<AdminPage<T>>, spec: &'static FieldSpec) -> AnyView {
    let name = spec.name;
    let value = move || page.with(|p| p.form().draft().map(|d| d.get(name).to_string()).unwrap_or_default());
    let set = move |text: String| page.update(|p| p.set_field(name, text));

    match spec.kind {
        FieldKind::Select(options) => view! {
            <select id=name on:change=move |ev| set(event_target_value(&ev))>
                <Show when=move || !spec.required || value().is_empty()>
                    <option value="" selected=move || value().is_empty()>"Choose…"</option>
                </Show>
                {options.iter().map(|(option_value, option_label)| {
                    let option_value = *option_value;
                    view! {
                        <option value=option_value selected=move || value() == option_value>{*option_label}</option>
                    }
                }).collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::TextArea => view! {
            <textarea id=name prop:value=value on:input=move |ev| set(event_target_value(&ev))></textarea>
        }
        .into_any(),
        FieldKind::Number { min, integer } => view! {
            <input
                id=name
                type="number"
                step=if integer { "1" } else { "any" }
                min=min.map(|m| m.to_string())
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        kind => view! {
            <input
                id=name
                type=input_type(kind)
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    }
}

/// Modal with one labelled control per schema field
///
/// The submit button stays disabled while a required field is empty or a
/// submission is in flight.
pub fn form_modal<T: Entity>(page: RwSignal<AdminPage<T>>, on_submit: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let noun = page.with_untracked(|p| p.noun());
    let title = move || {
        page.with(|p| match p.form().mode() {
            Some(FormMode::Edit(id)) => format!("Edit {} #{}", noun, id),
            _ => format!("New {}", noun),
        })
    };
    let can_submit = move || page.with(|p| p.form().can_submit());
    let submitting = move || page.with(|p| p.form().is_submitting());
    let message = move || page.with(|p| p.form().message().map(str::to_string));

    let fields = T::schema()
        .fields
        .iter()
        .map(|spec| {
            let name = spec.name;
            let error = move || page.with(|p| p.form().draft().and_then(|d| d.error(name)).map(str::to_string));
            view! {
                <div class="form-field" class:has-error=move || error().is_some()>
                    <label for=name>
                        {spec.label}
                        {spec.required.then_some(view! { <span class="required">" *"</span> })}
                    </label>
                    {field_control(page, spec)}
                    {move || error().map(|text| view! { <span class="field-error">{text}</span> })}
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="modal-backdrop">
            <form
                class="modal form-modal"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <h3>{title}</h3>
                {move || message().map(|text| view! { <div class="form-message" role="alert">{text}</div> })}
                {fields}
                <div class="modal-actions">
                    <button type="button" class="cancel-btn" disabled=submitting on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || !can_submit()>
                        {move || if submitting() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
