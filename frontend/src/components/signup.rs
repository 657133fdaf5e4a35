//! Account creation. Debounced like the login screen.

use std::rc::Rc;
use std::time::Duration;

use geoflip_client::config::LOGIN_DEBOUNCE_MS;
use geoflip_client::{Debouncer, SignupForm};
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::Title;
use leptos_router::A;

use crate::components::LoadingBackdrop;
use crate::services::{submitter, SignalView};

#[component]
pub fn SignupPage() -> impl IntoView {
    let (first_name, set_first_name) = create_signal(String::new());
    let (last_name, set_last_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (accept_terms, set_accept_terms) = create_signal(false);
    let (loading, set_loading) = create_signal(false);

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

            let form = SignupForm {
                first_name: first_name.get_untracked(),
                last_name: last_name.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                confirm_password: confirm.get_untracked(),
                accept_terms: accept_terms.get_untracked(),
            };
            log::info!("📝 Signing up {}", form.email);
            submitter.submit(&form, None, &view).await;
        });
    };

    view! {
        <Title text="Sign Up | Geoflip"/>
        <LoadingBackdrop loading=loading/>
        <div class="auth-page">
            <h1>"Sign Up"</h1>
            <form class="auth-form" novalidate=true on:submit=on_submit>
                <div class="form-row">
                    <input
                        placeholder="First Name"
                        autocomplete="given-name"
                        prop:value=first_name
                        on:input=move |ev| set_first_name.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="Last Name"
                        autocomplete="family-name"
                        prop:value=last_name
                        on:input=move |ev| set_last_name.set(event_target_value(&ev))
                    />
                </div>
                <input
                    type="email"
                    placeholder="Email Address"
                    autocomplete="email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="new-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm Password"
                    autocomplete="new-password"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=accept_terms
                        on:change=move |ev| set_accept_terms.set(event_target_checked(&ev))
                    />
                    "I agree to the terms of service and privacy policy"
                </label>
                <button type="submit" class="primary-button" disabled=move || loading.get()>
                    "Sign Up"
                </button>
            </form>
            <div class="auth-links">
                <A href="/login">"Already have an account? Log in"</A>
            </div>
        </div>
    }
}
