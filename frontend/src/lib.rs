//! Geoflip - Account screens in Rust/Leptos
//!
//! A WebAssembly frontend for creating a Geoflip account, signing in,
//! recovering a password, verifying an email address and following export
//! jobs. Every form goes through the `geoflip-client` submission pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (user, refresh, logout)                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /login            LoginPage + ForgotPasswordDialog      │
//! │  ├── /signup           SignupPage                            │
//! │  ├── /reset-password   ResetPasswordPage                     │
//! │  ├── /verify           VerifyPage                            │
//! │  └── /                 HomePage (verification, exports)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                               ToastStack             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Toast types
//! - [`state`] - Session and toast context
//! - [`components`] - UI components (screens, panels, layout)
//! - [`services`] - Transport, storage and the pipeline view

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{StorageSync, Toast, ToastQueue};

// State
pub use state::{provide_app_state, AppSession, Toasts};

// Components
pub use components::*;

// Services
pub use services::{submitter, GlooTransport, LocalStorageStore, SignalView};

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Geoflip - Starting Leptos App (API: {})", API_URL);

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();

    view! {
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/signup" view=SignupPage/>
                    <Route path="/reset-password" view=ResetPasswordPage/>
                    <Route path="/verify" view=VerifyPage/>
                    <Route path="/" view=HomePage/>
                </Routes>
            </main>
            <Footer/>
            <ToastStack/>
        </Router>
    }
}
