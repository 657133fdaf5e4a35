//! `localStorage`-backed session store.

use geoflip_client::auth::AuthState;
use geoflip_client::session::{decode_auth_state, SessionStore, AUTH_STATE_KEY};
use geoflip_client::{StorageError, StorageResult};
use web_sys::Storage;

/// Keeps the auth state under `authState` in `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> StorageResult<Storage> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
}

fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> StorageResult<Option<AuthState>> {
        let raw = local_storage()?.get_item(AUTH_STATE_KEY).map_err(js_error)?;
        Ok(raw.as_deref().and_then(decode_auth_state))
    }

    fn save(&self, state: &AuthState) -> StorageResult<()> {
        let raw = serde_json::to_string(state)?;
        local_storage()?.set_item(AUTH_STATE_KEY, &raw).map_err(js_error)
    }

    fn clear(&self) -> StorageResult<()> {
        local_storage()?.remove_item(AUTH_STATE_KEY).map_err(js_error)
    }
}
