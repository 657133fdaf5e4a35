//! Authentication state and its reducer.

use std::cell::RefCell;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The logged-in account, as returned by the accounts API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub user_id: Option<Value>,
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub subscription_active: bool,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful login or token refresh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    #[serde(default, deserialize_with = "deserialize_expiry")]
    pub expiry: Option<DateTime<Utc>>,
}

/// Body of a successful verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifyResponse {
    pub data: User,
}

/// Session-wide authentication state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

/// State transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginRequest,
    LoginSuccess(LoginResponse),
    LoginFailure,
    Logout,
    SetAuthState(AuthState),
    SetUser(User),
    VerifyRequest,
    VerifySuccess(User),
    VerifyFailure,
}

impl AuthState {
    /// Apply one action.
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginSuccess(response) => {
                self.is_authenticated = true;
                self.user = Some(response.user);
                self.token = Some(response.access_token);
                self.expiry = response.expiry;
            }
            AuthAction::Logout => *self = AuthState::default(),
            AuthAction::SetAuthState(state) => *self = state,
            AuthAction::SetUser(user) | AuthAction::VerifySuccess(user) => self.user = Some(user),
            AuthAction::LoginRequest
            | AuthAction::LoginFailure
            | AuthAction::VerifyRequest
            | AuthAction::VerifyFailure => {}
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_verified)
    }

    /// `true` once `now` is past the token expiry. Tokens without an expiry
    /// never expire locally.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| now >= expiry)
    }
}

/// Something that owns an [`AuthState`] and accepts actions.
pub trait AuthDispatch {
    fn dispatch(&self, action: AuthAction);
}

impl AuthDispatch for RefCell<AuthState> {
    fn dispatch(&self, action: AuthAction) {
        self.borrow_mut().apply(action);
    }
}

/// Accept RFC 3339, a naive ISO timestamp (taken as UTC) or Unix seconds.
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_expiry))
}

pub(crate) fn parse_expiry(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    };

    parsed.or_else(|| {
        log::warn!("Ignoring unrecognised token expiry: {}", value);
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login_response() -> LoginResponse {
        serde_json::from_value(json!({
            "user": {"user_id": 7, "email": "ada@geoflip.io", "is_verified": false, "apikeys": []},
            "access_token": "tok",
            "expiry": "2030-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_login_success_sets_everything() {
        let mut state = AuthState::default();
        state.apply(AuthAction::LoginRequest);
        assert_eq!(state, AuthState::default());

        state.apply(AuthAction::LoginSuccess(login_response()));
        assert!(state.is_authenticated);
        assert_eq!(state.token(), Some("tok"));
        assert_eq!(state.user.as_ref().unwrap().email, "ada@geoflip.io");
        assert!(state.user.as_ref().unwrap().extra.contains_key("apikeys"));
        assert!(!state.is_verified());
    }

    #[test]
    fn test_logout_from_any_state_is_initial() {
        let mut state = AuthState::default();
        state.apply(AuthAction::LoginSuccess(login_response()));
        state.apply(AuthAction::Logout);
        assert_eq!(state, AuthState::default());

        state.apply(AuthAction::Logout);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_verify_success_replaces_user_only() {
        let mut state = AuthState::default();
        state.apply(AuthAction::LoginSuccess(login_response()));

        let mut verified = state.user.clone().unwrap();
        verified.is_verified = true;
        state.apply(AuthAction::VerifyFailure);
        assert!(!state.is_verified());
        state.apply(AuthAction::VerifySuccess(verified));

        assert!(state.is_verified());
        assert_eq!(state.token(), Some("tok"));
    }

    #[test]
    fn test_expiry_formats() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_expiry(&json!("2030-01-01T00:00:00Z")), Some(expected));
        assert_eq!(parse_expiry(&json!("2030-01-01T00:00:00.000000")), Some(expected));
        assert_eq!(parse_expiry(&json!(expected.timestamp())), Some(expected));
        assert_eq!(parse_expiry(&json!("tomorrow")), None);
        assert_eq!(parse_expiry(&json!(true)), None);
    }

    #[test]
    fn test_is_expired() {
        let mut state = AuthState::default();
        let now = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        assert!(!state.is_expired(now));

        state.apply(AuthAction::LoginSuccess(login_response()));
        assert!(state.is_expired(now));
        assert!(!state.is_expired(Utc.with_ymd_and_hms(2029, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_state_round_trips_through_storage_format() {
        let mut state = AuthState::default();
        state.apply(AuthAction::LoginSuccess(login_response()));

        let stored = serde_json::to_value(&state).unwrap();
        assert_eq!(stored["isAuthenticated"], true);
        assert_eq!(stored["token"], "tok");

        let restored: AuthState = serde_json::from_value(stored).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_dispatch_through_refcell() {
        let cell = RefCell::new(AuthState::default());
        cell.dispatch(AuthAction::LoginSuccess(login_response()));
        assert!(cell.borrow().is_authenticated);
    }
}
