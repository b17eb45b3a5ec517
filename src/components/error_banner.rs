//! Error Banner Component
//!
//! Page-level failure message with optional retry.

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
    #[prop(optional, into)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        {move || message.get().map(|text| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{text}</span>
                {on_retry.map(|retry| view! {
                    <button type="button" class="retry-btn" on:click=move |_| retry.run(())>
                        "Retry"
                    </button>
                })}
                <button type="button" class="dismiss-btn" title="Dismiss" on:click=move |_| on_dismiss.run(())>
                    "×"
                </button>
            </div>
        })}
    }
}
