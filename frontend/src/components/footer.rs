//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Geoflip • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://geoflip.io" class="footer-link" target="_blank">
                    "Website"
                </a>
                <a href="https://geoflip.io/api-docs" class="footer-link" target="_blank">
                    "API docs"
                </a>
            </div>
        </footer>
    }
}
