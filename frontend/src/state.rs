//! Application-wide reactive state, shared through Leptos context.
//!
//! - [`AppSession`] - auth state and export jobs for this tab
//! - [`Toasts`] - notifications on screen

use geoflip_client::auth::{AuthAction, AuthDispatch, AuthState};
use geoflip_client::session::{restore_auth_state, SessionStore};
use geoflip_client::{ExportJob, ExportJobs, ExportsError, ExportsResult, Notification};
use gloo_timers::callback::Timeout;
use leptos::*;

use crate::services::LocalStorageStore;
use crate::types::{StorageSync, Toast, ToastQueue};
use crate::TOAST_DURATION_MS;

// =============================================================================
// Session
// =============================================================================

#[derive(Clone, Copy)]
pub struct AppSession {
    pub auth: RwSignal<AuthState>,
    pub exports: RwSignal<ExportJobs>,
    /// Keep the auth state in `localStorage` across reloads.
    remember: StoredValue<bool>,
}

impl AppSession {
    /// Session seeded from `localStorage`. A restored session stays
    /// remembered.
    pub fn restore() -> Self {
        let state = restore_auth_state(&LocalStorageStore).unwrap_or_default();
        let restored = state.is_authenticated;
        if restored {
            log::info!("🔑 Restored session");
        }
        Self {
            auth: create_rw_signal(state),
            exports: create_rw_signal(ExportJobs::new()),
            remember: store_value(restored),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.with(|s| s.is_authenticated)
    }

    pub fn token(&self) -> Option<String> {
        self.auth.with_untracked(|s| s.token.clone())
    }

    pub fn set_remember(&self, remember: bool) {
        self.remember.set_value(remember);
    }

    /// Mirror the auth state into storage: saved while logged in and
    /// remembered, removed once logged out.
    fn sync_storage(&self) {
        let remember = self.remember.get_value();
        let result = self.auth.with_untracked(|state| {
            match StorageSync::for_session(state.is_authenticated, remember) {
                StorageSync::Save => LocalStorageStore.save(state),
                StorageSync::Keep => Ok(()),
                StorageSync::Clear => LocalStorageStore.clear(),
            }
        });
        if let Err(e) = result {
            log::warn!("Could not update stored session: {}", e);
        }
    }

    pub fn add_export(&self, name: String, output_format: String, task_id: String) {
        self.exports.update(|jobs| jobs.add(name, output_format, task_id));
    }

    pub fn remove_export(&self, index: usize) -> ExportsResult<ExportJob> {
        match self.exports.try_update(|jobs| jobs.remove(index)) {
            Some(result) => result,
            None => {
                log::warn!("Export list signal is disposed, cannot remove job {}", index);
                Err(ExportsError::Unavailable)
            }
        }
    }
}

impl AuthDispatch for AppSession {
    fn dispatch(&self, action: AuthAction) {
        if matches!(action, AuthAction::Logout) {
            self.exports.update(ExportJobs::clear);
        }
        self.auth.update(|state| state.apply(action));
        self.sync_storage();
    }
}

// =============================================================================
// Toasts
// =============================================================================

#[derive(Clone, Copy)]
pub struct Toasts(RwSignal<ToastQueue>);

impl Toasts {
    pub fn new() -> Self {
        Self(create_rw_signal(ToastQueue::default()))
    }

    /// Show `notification` and schedule its dismissal.
    pub fn push(&self, notification: Notification) {
        log::info!("{} {}", notification.severity.emoji(), notification.message);
        let Some(id) = self.0.try_update(|queue| queue.push(notification)) else {
            return;
        };

        let toasts = *self;
        Timeout::new(TOAST_DURATION_MS, move || toasts.dismiss(id)).forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.0.update(|queue| queue.dismiss(id));
    }

    pub fn items(&self) -> Vec<Toast> {
        self.0.with(|queue| queue.items().to_vec())
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Put the session and toasts in context for every screen.
pub fn provide_app_state() {
    provide_context(AppSession::restore());
    provide_context(Toasts::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AppSession {
        AppSession {
            auth: create_rw_signal(AuthState::default()),
            exports: create_rw_signal(ExportJobs::new()),
            remember: store_value(false),
        }
    }

    #[test]
    fn test_remove_export() {
        let runtime = create_runtime();
        let session = session();
        session.add_export("Parcels".into(), "GeoJSON".into(), "t1".into());

        assert_eq!(session.remove_export(0).unwrap().task_id, "t1");
        assert_eq!(
            session.remove_export(0),
            Err(ExportsError::IndexOutOfBounds { index: 0, len: 0 })
        );

        runtime.dispose();
    }

    #[test]
    fn test_remove_export_after_dispose() {
        let runtime = create_runtime();
        let session = session();
        session.add_export("Parcels".into(), "GeoJSON".into(), "t1".into());

        session.exports.dispose();

        assert_eq!(session.remove_export(0), Err(ExportsError::Unavailable));
        runtime.dispose();
    }
}
