//! Authentication collaborators.
//!
//! [`login`], [`verify`], [`refresh_token`] and [`logout`] run through the
//! same [`FormSubmitter`] as every other screen, then fold the result into
//! the session's [`AuthState`] via an [`AuthDispatch`]. Each returns an
//! [`AuthResult`] whose message is `"success"` when it worked.

pub mod state;

use serde_json::{json, Value};

use crate::actions::LOGIN_ROUTE;
use crate::pipeline::{
    FormAction, FormSubmitter, FormView, Notification, SilentView, Submission, SubmissionForm,
    SubmissionOutcome,
};
use crate::transport::Transport;

pub use state::{AuthAction, AuthDispatch, AuthState, LoginResponse, User, VerifyResponse};

pub const LOGIN_PATH: &str = "/accounts/user/login";
pub const VERIFY_PATH: &str = "/accounts/user/verify";
pub const REFRESH_TOKEN_PATH: &str = "/accounts/user/refresh-token";
pub const LOGOUT_PATH: &str = "/accounts/user/logout";

/// Route shown after a successful login.
pub const HOME_ROUTE: &str = "/";

pub const SUCCESS: &str = "success";
pub const NETWORK_ERROR: &str = "Network error, please try again later";
pub const LOGIN_UNEXPECTED: &str = "An unexpected error occured while logging in, please try again later";
pub const VERIFY_UNEXPECTED: &str = "An unexpected error occured while verifying, please try again later";
pub const UNAUTHORIZED: &str = "Unauthorized access, please login again";
pub const EMAIL_VERIFIED: &str = "Email successfully verified";

/// Status and message of an auth call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// HTTP status, when a response arrived.
    pub status: Option<u16>,
    /// `"success"` or the failure message.
    pub message: String,
}

impl AuthResult {
    fn success(status: u16) -> Self {
        Self {
            status: Some(status),
            message: SUCCESS.to_string(),
        }
    }

    fn failure(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn from_submission(submission: &Submission, action: &FormAction) -> Self {
        match submission {
            Submission::Invalid(failure) => Self::failure(None, failure.message.clone()),
            Submission::Suppressed => Self::failure(None, "Submission already in progress"),
            Submission::Resolved(outcome) => {
                let status = match outcome {
                    SubmissionOutcome::ServerRejected { status, .. } => Some(*status),
                    SubmissionOutcome::Success(_) => Some(action.success_status),
                    _ => None,
                };
                Self::failure(status, outcome.message(action))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.message == SUCCESS
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Email and password sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl SubmissionForm for LoginForm {
    fn action() -> FormAction {
        FormAction::post("login", LOGIN_PATH)
            .with_no_response_message(NETWORK_ERROR)
            .with_client_error_message(LOGIN_UNEXPECTED)
    }

    fn payload(&self) -> Option<Value> {
        Some(json!({ "email": self.email, "password": self.password }))
    }
}

/// Email-verification code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyForm {
    pub code: String,
}

impl SubmissionForm for VerifyForm {
    fn action() -> FormAction {
        FormAction::post("verify", VERIFY_PATH)
            .with_token()
            .with_success_status(201)
            .with_no_response_message(NETWORK_ERROR)
            .with_client_error_message(VERIFY_UNEXPECTED)
    }

    fn payload(&self) -> Option<Value> {
        Some(json!({ "code": self.code }))
    }
}

struct RefreshTokenForm;

impl SubmissionForm for RefreshTokenForm {
    fn action() -> FormAction {
        FormAction::post("refresh-token", REFRESH_TOKEN_PATH)
            .with_token()
            .with_no_response_message(NETWORK_ERROR)
            .with_client_error_message(LOGIN_UNEXPECTED)
    }

    fn payload(&self) -> Option<Value> {
        None
    }
}

struct LogoutForm;

impl SubmissionForm for LogoutForm {
    fn action() -> FormAction {
        FormAction::post("logout", LOGOUT_PATH)
            .with_token()
            .with_navigation(LOGIN_ROUTE)
            .with_no_response_message(NETWORK_ERROR)
            .with_client_error_message(VERIFY_UNEXPECTED)
    }

    fn payload(&self) -> Option<Value> {
        None
    }
}

// =============================================================================
// Collaborators
// =============================================================================

/// Sign in; on success store the session and navigate home.
pub async fn login<T, D, V>(submitter: &FormSubmitter<T>, form: &LoginForm, auth: &D, view: &V) -> AuthResult
where
    T: Transport,
    D: AuthDispatch + ?Sized,
    V: FormView + ?Sized,
{
    auth.dispatch(AuthAction::LoginRequest);
    let submission = submitter.submit(form, None, view).await;

    if let Submission::Resolved(SubmissionOutcome::Success(body)) = &submission {
        return match serde_json::from_value::<LoginResponse>(body.clone()) {
            Ok(response) => {
                log::info!("🔑 Logged in as {}", response.user.email);
                auth.dispatch(AuthAction::LoginSuccess(response));
                view.navigate(HOME_ROUTE);
                AuthResult::success(200)
            }
            Err(e) => {
                log::error!("Login response did not match the expected shape: {}", e);
                auth.dispatch(AuthAction::LoginFailure);
                view.notify(Notification::error(LOGIN_UNEXPECTED));
                AuthResult::failure(Some(200), LOGIN_UNEXPECTED)
            }
        };
    }

    auth.dispatch(AuthAction::LoginFailure);
    AuthResult::from_submission(&submission, &LoginForm::action())
}

/// Confirm the email-verification code for the logged-in user.
pub async fn verify<T, D, V>(
    submitter: &FormSubmitter<T>,
    form: &VerifyForm,
    token: Option<&str>,
    auth: &D,
    view: &V,
) -> AuthResult
where
    T: Transport,
    D: AuthDispatch + ?Sized,
    V: FormView + ?Sized,
{
    auth.dispatch(AuthAction::VerifyRequest);
    let submission = submitter.submit(form, token, view).await;

    if let Submission::Resolved(SubmissionOutcome::Success(body)) = &submission {
        return match serde_json::from_value::<VerifyResponse>(body.clone()) {
            Ok(response) => {
                auth.dispatch(AuthAction::VerifySuccess(response.data));
                view.notify(Notification::success(EMAIL_VERIFIED));
                AuthResult::success(201)
            }
            Err(e) => {
                log::error!("Verify response did not match the expected shape: {}", e);
                auth.dispatch(AuthAction::VerifyFailure);
                view.notify(Notification::error(VERIFY_UNEXPECTED));
                AuthResult::failure(Some(201), VERIFY_UNEXPECTED)
            }
        };
    }

    auth.dispatch(AuthAction::VerifyFailure);
    AuthResult::from_submission(&submission, &VerifyForm::action())
}

/// Exchange the current token for a fresh one. Shows nothing.
pub async fn refresh_token<T, D>(submitter: &FormSubmitter<T>, token: &str, auth: &D) -> AuthResult
where
    T: Transport,
    D: AuthDispatch + ?Sized,
{
    let submission = submitter.submit(&RefreshTokenForm, Some(token), &SilentView).await;

    if let Submission::Resolved(SubmissionOutcome::Success(body)) = &submission {
        if let Ok(response) = serde_json::from_value::<LoginResponse>(body.clone()) {
            auth.dispatch(AuthAction::LoginSuccess(response));
            return AuthResult::success(200);
        }
        log::error!("Refresh response did not match the expected shape");
        auth.dispatch(AuthAction::LoginFailure);
        return AuthResult::failure(Some(200), LOGIN_UNEXPECTED);
    }

    auth.dispatch(AuthAction::LoginFailure);
    AuthResult::from_submission(&submission, &RefreshTokenForm::action())
}

/// End the session on the server. A `401` ends it locally as well.
pub async fn logout<T, D, V>(submitter: &FormSubmitter<T>, token: &str, auth: &D, view: &V) -> AuthResult
where
    T: Transport,
    D: AuthDispatch + ?Sized,
    V: FormView + ?Sized,
{
    let submission = submitter.submit(&LogoutForm, Some(token), view).await;

    match submission.outcome() {
        Some(SubmissionOutcome::Success(_)) => {
            auth.dispatch(AuthAction::Logout);
            AuthResult::success(200)
        }
        Some(SubmissionOutcome::ServerRejected { status: 401, .. }) => {
            auth.dispatch(AuthAction::Logout);
            AuthResult::failure(Some(401), UNAUTHORIZED)
        }
        _ => AuthResult::from_submission(&submission, &LogoutForm::action()),
    }
}
