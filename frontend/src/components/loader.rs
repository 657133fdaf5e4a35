//! Full-screen loading backdrop

use leptos::*;

#[component]
pub fn LoadingBackdrop(loading: ReadSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get() fallback=|| view! {}>
            <div class="loading-backdrop">
                <div class="spinner"></div>
            </div>
        </Show>
    }
}
