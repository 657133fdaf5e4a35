//! Reset password with the emailed code.

use std::rc::Rc;

use geoflip_client::config::OTP_LENGTH;
use geoflip_client::ResetPasswordForm;
use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_query_map, A};

use crate::components::LoadingBackdrop;
use crate::services::{submitter, SignalView};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    // `/reset-password?email=...` pre-fills the address.
    let prefill = use_query_map().with_untracked(|q| q.get("email").cloned().unwrap_or_default());

    let (email, set_email) = create_signal(prefill);
    let (code, set_code) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let view = SignalView::new(set_loading);
    let submitter = Rc::new(submitter());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = ResetPasswordForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
            code: code.get_untracked(),
        };
        let submitter = submitter.clone();
        let view = view.clone();
        spawn_local(async move {
            submitter.submit(&form, None, &view).await;
        });
    };

    view! {
        <Title text="Reset Password | Geoflip"/>
        <LoadingBackdrop loading=loading/>
        <div class="auth-page">
            <h1>"Reset Password"</h1>
            <form class="auth-form" novalidate=true on:submit=on_submit>
                <label for="email">"Email Address"</label>
                <input
                    id="email"
                    type="email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <label for="code">"Reset code"</label>
                <input
                    id="code"
                    inputmode="numeric"
                    maxlength=OTP_LENGTH.to_string()
                    prop:value=code
                    on:input=move |ev| set_code.set(event_target_value(&ev))
                />
                <label for="password">"New password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <label for="confirm">"Confirm new password"</label>
                <input
                    id="confirm"
                    type="password"
                    autocomplete="new-password"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <button type="submit" class="primary-button" disabled=move || loading.get()>
                    "Reset password"
                </button>
            </form>
            <div class="auth-links">
                <A href="/login">"Back to login"</A>
            </div>
        </div>
    }
}
