//! Email verification: enter the 6-digit code or ask for a new one.

use std::rc::Rc;

use geoflip_client::config::OTP_LENGTH;
use geoflip_client::{auth, ResendVerificationForm, VerifyForm};
use leptos::*;

use crate::components::LoadingBackdrop;
use crate::services::{submitter, SignalView};
use crate::state::AppSession;

#[component]
pub fn VerificationPanel() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let (code, set_code) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let view = SignalView::new(set_loading);
    let submitter = Rc::new(submitter());

    let on_confirm = {
        let submitter = submitter.clone();
        let view = view.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let submitter = submitter.clone();
            let view = view.clone();
            let form = VerifyForm { code: code.get_untracked() };
            spawn_local(async move {
                let token = session.token();
                if auth::verify(&submitter, &form, token.as_deref(), &session, &view)
                    .await
                    .is_success()
                {
                    set_code.set(String::new());
                }
            });
        }
    };

    let on_resend = move |_| {
        let submitter = submitter.clone();
        let view = view.clone();
        spawn_local(async move {
            let token = session.token();
            submitter.submit(&ResendVerificationForm, token.as_deref(), &view).await;
        });
    };

    let email = move || {
        session
            .auth
            .with(|s| s.user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_default()
    };

    view! {
        <LoadingBackdrop loading=loading/>
        <section class="panel">
            <h2>"Email Verification"</h2>
            <p class="panel-subtitle">"Verify your account to access api keys"</p>
            <p>{format!("Please enter the {}-digit code sent to your email:", OTP_LENGTH)}</p>
            <p class="panel-muted">{email}</p>
            <form class="otp-form" novalidate=true on:submit=on_confirm>
                <input
                    class="otp-input"
                    inputmode="numeric"
                    maxlength=OTP_LENGTH.to_string()
                    prop:value=code
                    on:input=move |ev| set_code.set(event_target_value(&ev))
                />
                <button type="submit" class="primary-button" disabled=move || loading.get()>
                    "Confirm"
                </button>
            </form>
            <button class="link-button" disabled=move || loading.get() on:click=on_resend>
                "Resend code"
            </button>
        </section>
    }
}
