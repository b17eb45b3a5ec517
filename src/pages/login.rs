//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{resume_after_login, use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let can_submit = move || !submitting.get() && !username.get().trim().is_empty() && !password.get().is_empty();

    let login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        let name = username.get_untracked().trim().to_string();
        let secret = password.get_untracked();
        let auth = ctx.auth();
        spawn_local(async move {
            match auth.login(&name, &secret).await {
                Ok(response) => {
                    ctx.sign_in(response);
                    set_password.set(String::new());
                    resume_after_login(&store);
                }
                Err(e) => {
                    log::info!("login failed for {}: {}", name, e);
                    let message = if e.is_unauthorized() {
                        "Invalid username or password.".to_string()
                    } else {
                        e.user_message()
                    };
                    set_error.set(Some(message));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="login-page">
            <form class="login-form" on:submit=login>
                <h2>"Sign in to RoomDesk"</h2>
                {move || store.notice().get().map(|text| view! { <p class="notice">{text}</p> })}
                {move || error.get().map(|text| view! { <p class="form-message" role="alert">{text}</p> })}
                <label>
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || !can_submit()>
                    {move || if submitting.get() { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
        </section>
    }
}
