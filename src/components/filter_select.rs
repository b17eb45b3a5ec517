//! Filter Select Component

use leptos::prelude::*;

/// Dropdown for one filter. The empty choice means "no filter".
#[component]
pub fn FilterSelect(
    label: &'static str,
    /// (value, label) pairs
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-select">
            <span class="filter-label">{label}</span>
            <select on:change=move |ev| on_change.run(event_target_value(&ev))>
                <option value="" selected=move || value.get().is_empty()>"All"</option>
                {move || options.get().into_iter().map(|(option_value, option_label)| {
                    let selected = {
                        let option_value = option_value.clone();
                        move || value.get() == option_value
                    };
                    view! {
                        <option value=option_value selected=selected>{option_label}</option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
