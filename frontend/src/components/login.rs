//! Login screen and the forgot-password dialog.
//!
//! Submits are debounced: a burst of clicks or Enter presses inside
//! [`LOGIN_DEBOUNCE_MS`] results in one login request, sent with the field
//! values as they are when the window closes.

use std::rc::Rc;
use std::time::Duration;

use geoflip_client::config::LOGIN_DEBOUNCE_MS;
use geoflip_client::{auth, Debouncer, ForgotPasswordForm, LoginForm};
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::Title;
use leptos_router::A;

use crate::components::LoadingBackdrop;
use crate::services::{submitter, SignalView};
use crate::state::AppSession;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (remember, set_remember) = create_signal(false);
    let (loading, set_loading) = create_signal(false);
    let dialog_open = create_rw_signal(false);

    let view = SignalView::new(set_loading);
    let submitter = Rc::new(submitter());
    let debouncer = Rc::new(Debouncer::new(Duration::from_millis(LOGIN_DEBOUNCE_MS)));

    {
        let debouncer = debouncer.clone();
        on_cleanup(move || debouncer.cancel());
    }

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let ticket = debouncer.trigger();
        let debouncer = debouncer.clone();
        let submitter = submitter.clone();
        let view = view.clone();

        spawn_local(async move {
            TimeoutFuture::new(debouncer.window().as_millis() as u32).await;
            if !debouncer.is_current(ticket) {
                return;
            }

            let form = LoginForm {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            session.set_remember(remember.get_untracked());
            log::info!("🔑 Logging in as {}", form.email);
            auth::login(&submitter, &form, &session, &view).await;
        });
    };

    view! {
        <Title text="Log In | Geoflip"/>
        <LoadingBackdrop loading=loading/>
        <div class="auth-page">
            <h1>"Log In"</h1>
            <form class="auth-form" novalidate=true on:submit=on_submit>
                <label for="email">"Email Address"</label>
                <input
                    id="email"
                    type="email"
                    autocomplete="email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=remember
                        on:change=move |ev| set_remember.set(event_target_checked(&ev))
                    />
                    "Remember me"
                </label>
                <button type="submit" class="primary-button" disabled=move || loading.get()>
                    "Log In"
                </button>
            </form>
            <div class="auth-links">
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    dialog_open.set(true);
                }>
                    "Forgot password?"
                </a>
                <A href="/reset-password">"I have a reset code"</A>
                <A href="/signup">"Don't have an account? Sign Up"</A>
            </div>
        </div>
        <ForgotPasswordDialog open=dialog_open/>
    }
}

/// Ask for a reset code by email.
#[component]
pub fn ForgotPasswordDialog(open: RwSignal<bool>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let view = SignalView::new(set_loading);
    let submitter = Rc::new(submitter());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let submitter = submitter.clone();
        let view = view.clone();
        spawn_local(async move {
            let form = ForgotPasswordForm {
                email: email.get_untracked(),
            };
            if submitter.submit(&form, None, &view).await.is_success() {
                open.set(false);
            }
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| view! {}>
            <div class="dialog-backdrop">
                <div class="dialog">
                    <h2>"Forgot Password"</h2>
                    <p>"Enter your email address and we will send you a reset code."</p>
                    <form novalidate=true on:submit=on_submit.clone()>
                        <input
                            type="email"
                            placeholder="Email Address"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <div class="dialog-actions">
                            <button type="button" on:click=move |_| open.set(false)>"Cancel"</button>
                            <button type="submit" class="primary-button" disabled=move || loading.get()>
                                "Send code"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
