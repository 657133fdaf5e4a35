//! Browser-side services.
//!
//! # Services
//!
//! - [`transport`] - `fetch`-based transport for the submission pipeline
//! - [`storage`] - `localStorage` session store
//! - [`view`] - pipeline feedback through signals, toasts and the router

pub mod storage;
pub mod transport;
pub mod view;

pub use storage::*;
pub use transport::*;
pub use view::*;

use geoflip_client::{ClientConfig, FormSubmitter};

use crate::{API_URL, GUARD_IN_FLIGHT};

/// A submitter for one screen, pointed at [`API_URL`].
pub fn submitter() -> FormSubmitter<GlooTransport> {
    let config = ClientConfig::new(API_URL).unwrap_or_else(|e| {
        log::error!("{}; falling back to the default API URL", e);
        ClientConfig::default()
    });
    FormSubmitter::new(GlooTransport, config.with_guard_in_flight(GUARD_IN_FLIGHT))
}
