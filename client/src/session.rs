//! Per-session state and its persistence.
//!
//! A [`Session`] owns the auth state and the export list. Only the auth
//! state outlives the process, through a [`SessionStore`]; the export list
//! starts empty every time.

use std::cell::RefCell;

use chrono::Utc;

use crate::auth::{AuthAction, AuthDispatch, AuthState};
use crate::error::{ExportsResult, StorageResult};
use crate::exports::{ExportJob, ExportJobs};

/// Key the auth state is stored under.
pub const AUTH_STATE_KEY: &str = "authState";

/// Where the auth state is kept between runs.
pub trait SessionStore {
    /// Stored state, or `None` when nothing usable is there.
    fn load(&self) -> StorageResult<Option<AuthState>>;
    fn save(&self, state: &AuthState) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

/// Decode a stored entry. Corrupt entries are logged and dropped.
pub fn decode_auth_state(raw: &str) -> Option<AuthState> {
    match serde_json::from_str(raw) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("Discarding corrupt stored session: {}", e);
            None
        }
    }
}

/// Stored auth state that is still usable: present, readable and not
/// expired.
pub fn restore_auth_state<S: SessionStore + ?Sized>(store: &S) -> Option<AuthState> {
    match store.load() {
        Ok(Some(state)) if state.is_expired(Utc::now()) => {
            log::info!("Stored session has expired, starting logged out");
            None
        }
        Ok(state) => state,
        Err(e) => {
            log::warn!("Could not read stored session: {}", e);
            None
        }
    }
}

#[cfg(feature = "native")]
pub use file::{FileSessionStore, DEFAULT_SESSION_FILE};

#[cfg(feature = "native")]
mod file {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use serde_json::{Map, Value};

    use super::{decode_auth_state, SessionStore, AUTH_STATE_KEY};
    use crate::auth::AuthState;
    use crate::error::StorageResult;

    /// Session file used by the CLI (relative to the current dir).
    pub const DEFAULT_SESSION_FILE: &str = ".geoflip/session.json";

    /// JSON file holding `{ "authState": { ... } }`.
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Default for FileSessionStore {
        fn default() -> Self {
            Self::new(DEFAULT_SESSION_FILE)
        }
    }

    impl SessionStore for FileSessionStore {
        fn load(&self) -> StorageResult<Option<AuthState>> {
            let content = match fs::read_to_string(&self.path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            };

            let Ok(Value::Object(mut entries)) = serde_json::from_str::<Value>(&content) else {
                log::warn!("Session file {} is not a JSON object, ignoring it", self.path.display());
                return Ok(None);
            };

            Ok(match entries.remove(AUTH_STATE_KEY) {
                Some(Value::String(raw)) => decode_auth_state(&raw),
                Some(value) => decode_auth_state(&value.to_string()),
                None => None,
            })
        }

        fn save(&self, state: &AuthState) -> StorageResult<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let mut entries = Map::new();
            entries.insert(AUTH_STATE_KEY.to_string(), serde_json::to_value(state)?);
            fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
            log::debug!("Session saved to {}", self.path.display());
            Ok(())
        }

        fn clear(&self) -> StorageResult<()> {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Auth state and export list for one user session.
#[derive(Debug, Default)]
pub struct Session {
    auth: RefCell<AuthState>,
    exports: RefCell<ExportJobs>,
}

impl Session {
    /// Empty session: logged out, no exports.
    pub fn start() -> Self {
        Self::default()
    }

    /// Session seeded from `store`. Unreadable or expired state starts
    /// logged out.
    pub fn restore<S: SessionStore + ?Sized>(store: &S) -> Self {
        let session = Self::start();
        if let Some(state) = restore_auth_state(store) {
            session.dispatch(AuthAction::SetAuthState(state));
        }
        session
    }

    /// Write the auth state to `store`, or clear it when logged out.
    pub fn persist<S: SessionStore + ?Sized>(&self, store: &S) -> StorageResult<()> {
        let state = self.auth.borrow();
        if state.is_authenticated {
            store.save(&state)
        } else {
            store.clear()
        }
    }

    /// Log out locally and drop the export list.
    pub fn end(&self) {
        self.dispatch(AuthAction::Logout);
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.borrow().is_authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.auth.borrow().token.clone()
    }

    pub fn add_export(&self, name: impl Into<String>, output_format: impl Into<String>, task_id: impl Into<String>) {
        self.exports.borrow_mut().add(name, output_format, task_id);
    }

    pub fn remove_export(&self, index: usize) -> ExportsResult<ExportJob> {
        self.exports.borrow_mut().remove(index)
    }

    pub fn exports(&self) -> Vec<ExportJob> {
        self.exports.borrow().jobs().to_vec()
    }
}

impl AuthDispatch for Session {
    fn dispatch(&self, action: AuthAction) {
        if matches!(action, AuthAction::Logout) {
            self.exports.borrow_mut().clear();
        }
        self.auth.borrow_mut().apply(action);
    }
}
