//! Navigation bar with the signed-in user, token refresh and logout.

use std::rc::Rc;

use geoflip_client::auth;
use geoflip_client::Notification;
use leptos::*;
use leptos_router::A;

use crate::services::{submitter, SignalView};
use crate::state::{AppSession, Toasts};

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let toasts = expect_context::<Toasts>();
    let (loading, set_loading) = create_signal(false);
    let view = SignalView::new(set_loading);
    let submitter = Rc::new(submitter());

    let email = move || {
        session
            .auth
            .with(|s| s.user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_default()
    };

    let on_refresh = {
        let submitter = submitter.clone();
        move |_| {
            let Some(token) = session.token() else { return };
            let submitter = submitter.clone();
            spawn_local(async move {
                log::info!("🔄 Refreshing token...");
                let result = auth::refresh_token(&submitter, &token, &session).await;
                if result.is_success() {
                    toasts.push(Notification::info("Session refreshed"));
                } else {
                    toasts.push(Notification::error(result.message));
                }
            });
        }
    };

    let on_logout = move |_| {
        let Some(token) = session.token() else { return };
        let submitter = submitter.clone();
        let view = view.clone();
        spawn_local(async move {
            log::info!("👋 Logging out...");
            auth::logout(&submitter, &token, &session, &view).await;
        });
    };

    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">"GEOFLIP"</A>
            </div>
            <div class="header-right">
                <Show
                    when=move || session.is_authenticated()
                    fallback=|| view! { <A href="/login" class="header-link">"Log in"</A> }
                >
                    <span class="header-user">{email}</span>
                    <button class="header-button" on:click=on_refresh.clone()>"🔄"</button>
                    <button
                        class="header-button"
                        disabled=move || loading.get()
                        on:click=on_logout.clone()
                    >
                        "Log out"
                    </button>
                </Show>
            </div>
        </header>
    }
}
