//! # Geoflip client - account forms, session state and CLI
//!
//! Drives the Geoflip accounts API the way the web app does: every screen
//! submits through one pipeline that validates locally, sends one request,
//! classifies the answer and shows exactly one notification.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Form     │────▶│  Validate   │────▶│  Transport  │────▶│  Classify   │
//! │ (+ rules)   │     │ (first fail)│     │ (reqwest /  │     │  + notify   │
//! └─────────────┘     └─────────────┘     │  gloo-net)  │     └──────┬──────┘
//!                                         └─────────────┘            │
//!                                                              ┌─────▼──────┐
//!                                                              │  Session   │
//!                                                              │ (auth +    │
//!                                                              │  exports)  │
//!                                                              └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use geoflip_client::{ClientConfig, FormSubmitter, ForgotPasswordForm, ReqwestTransport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClientConfig::from_env().unwrap();
//!     let transport = ReqwestTransport::new(config.timeout).unwrap();
//!     let submitter = FormSubmitter::new(transport, config);
//!     let form = ForgotPasswordForm { email: "ada@example.com".into() };
//!     submitter.submit(&form, None, &geoflip_client::SilentView).await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per concern
//! - [`config`] - API URL, timeouts and form constants
//! - [`transport`] - Request/response types and the `Transport` trait
//! - [`validation`] - Ordered, first-failure-wins form rules
//! - [`pipeline`] - The submission pipeline, error extraction, debounce
//! - [`actions`] - Sign-up, forgot/reset password and resend-verification forms
//! - [`auth`] - Auth state reducer and login/verify/refresh/logout
//! - [`exports`] - Session export-job list
//! - [`session`] - Session ownership and persistence

// Core modules
pub mod config;
pub mod error;

// Pipeline
pub mod pipeline;
pub mod transport;
pub mod validation;

// Screens
pub mod actions;
pub mod auth;

// Session state
pub mod exports;
pub mod session;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, ConfigResult, ExportsError, ExportsResult, StorageError, StorageResult, TransportError,
    TransportResult, ValidationFailure,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use config::ClientConfig;
pub use pipeline::{
    DebounceTicket, Debouncer, FormAction, FormSubmitter, FormView, Notification, ServerError, Severity,
    SilentView, Submission, SubmissionForm, SubmissionOutcome,
};
pub use transport::{FormSubmissionRequest, HttpMethod, HttpResponse, Transport};
pub use validation::{validate, ValidationRule};

#[cfg(feature = "native")]
pub use transport::http::ReqwestTransport;

// =============================================================================
// Re-exports - Screens and session
// =============================================================================

pub use actions::{ForgotPasswordForm, ResendVerificationForm, ResetPasswordForm, SignupForm};
pub use auth::{AuthAction, AuthDispatch, AuthResult, AuthState, LoginForm, User, VerifyForm};
pub use exports::{ExportJob, ExportJobs};
pub use session::{Session, SessionStore, AUTH_STATE_KEY};

#[cfg(feature = "native")]
pub use session::FileSessionStore;
