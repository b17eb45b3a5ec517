//! Confirm Modal Component
//!
//! Styled yes/no dialog for destructive actions.

use leptos::ev;
use leptos::prelude::*;
use roomdesk_core::ConfirmPrompt;

/// Modal confirmation dialog
///
/// Rendered only while `prompt` holds a value. Escape or the backdrop
/// counts as cancel.
///
/// # Arguments
/// * `prompt` - Pending prompt, `None` when nothing awaits confirmation
/// * `on_confirm` - The user affirmed
/// * `on_cancel` - The user declined
#[component]
pub fn ConfirmModal(
    #[prop(into)] prompt: Signal<Option<ConfirmPrompt>>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    // the backdrop never holds focus, so Escape is caught on the window
    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && prompt.with_untracked(Option::is_some) {
            on_cancel.run(());
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        {move || prompt.get().map(|prompt| view! {
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
                <div class="modal confirm-modal" role="alertdialog" on:click=|ev| ev.stop_propagation()>
                    <h3>{prompt.title}</h3>
                    <p>{prompt.message}</p>
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="button" class="danger-btn" on:click=move |_| on_confirm.run(())>
                            {prompt.confirm_label}
                        </button>
                    </div>
                </div>
            </div>
        })}
    }
}
