//! Search Bar Component
//!
//! Text input that reports its value after the user stops typing.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEBOUNCE_MS: u32 = 250;

/// Debounced search input
///
/// # Arguments
/// * `placeholder` - Hint text shown while empty
/// * `value` - The applied search term; outside changes replace the input
/// * `on_search` - Receives the term once typing pauses, or "" when cleared
#[component]
pub fn SearchBar(
    #[prop(into)] placeholder: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_search: Callback<String>,
) -> impl IntoView {
    let (text, set_text) = signal(value.get_untracked());
    // bumped on every keystroke; a timer only fires for the latest one
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let applied = value.get();
        if applied != text.get_untracked() {
            generation.update_value(|g| *g += 1);
            set_text.set(applied);
        }
    });

    let on_input = move |ev| {
        let term = event_target_value(&ev);
        set_text.set(term.clone());
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(mine) {
                on_search.run(term);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        set_text.set(String::new());
        on_search.run(String::new());
    };

    view! {
        <div class="search-bar">
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=on_input
            />
            <Show when=move || !text.get().is_empty()>
                <button type="button" class="clear-btn" title="Clear search" on:click=clear>
                    "×"
                </button>
            </Show>
        </div>
    }
}
