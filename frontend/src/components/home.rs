//! Signed-in landing page.

use leptos::*;
use leptos_meta::Title;
use leptos_router::Redirect;

use crate::components::{ExportsPanel, VerificationPanel};
use crate::state::AppSession;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let verified = move || session.auth.with(|s| s.is_verified());

    view! {
        <Title text="Workspace | Geoflip"/>
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            <div class="workspace">
                <Show when=move || !verified() fallback=|| view! {}>
                    <VerificationPanel/>
                </Show>
                <ExportsPanel/>
            </div>
        </Show>
    }
}

/// Stand-alone verification screen, linked from the verification email.
#[component]
pub fn VerifyPage() -> impl IntoView {
    let session = expect_context::<AppSession>();

    view! {
        <Title text="Verify Email | Geoflip"/>
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            <div class="workspace">
                <VerificationPanel/>
            </div>
        </Show>
    }
}
