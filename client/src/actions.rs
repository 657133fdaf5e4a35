//! The account screens, described as [`SubmissionForm`]s.
//!
//! | Form                      | Endpoint                               | Auth   |
//! |---------------------------|----------------------------------------|--------|
//! | [`SignupForm`]             | `POST /accounts/user/register`           | -      |
//! | [`ForgotPasswordForm`]     | `POST /accounts/user/forgot-password`    | -      |
//! | [`ResetPasswordForm`]      | `POST /accounts/user/reset-password`     | -      |
//! | [`ResendVerificationForm`] | `POST /accounts/user/resend-verification`| Bearer |
//!
//! Login, verify, refresh and logout also drive the auth state and live in
//! [`crate::auth`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::config::{MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, OTP_LENGTH};
use crate::pipeline::{FormAction, SubmissionForm};
use crate::validation::ValidationRule;

pub const REGISTER_PATH: &str = "/accounts/user/register";
pub const FORGOT_PASSWORD_PATH: &str = "/accounts/user/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/accounts/user/reset-password";
pub const RESEND_VERIFICATION_PATH: &str = "/accounts/user/resend-verification";

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const INVALID_OTP: &str = "Invalid OTP";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";

/// Route of the login screen.
pub const LOGIN_ROUTE: &str = "/login";

/// Registration accepts a narrower address syntax than the other screens.
static SIGNUP_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("signup email pattern is valid")
});

// =============================================================================
// Sign up
// =============================================================================

pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const FIRST_NAME_TOO_SHORT: &str = "First name must be at least 2 characters long.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const LAST_NAME_TOO_SHORT: &str = "Last name must be at least 2 characters long.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const SIGNUP_INVALID_EMAIL: &str = "Invalid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const SIGNUP_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Please confirm your password.";
pub const SIGNUP_PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const TERMS_NOT_ACCEPTED: &str = "You must agree to the terms of service and privacy policy.";
pub const ACCOUNT_CREATED: &str = "Account created successfully! Log in to get started.";

/// Creates an account. The server answers `201 Created`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Terms of service and privacy policy accepted.
    pub accept_terms: bool,
}

impl SubmissionForm for SignupForm {
    fn action() -> FormAction {
        FormAction::post("signup", REGISTER_PATH)
            .with_success_status(201)
            .with_success_message(ACCOUNT_CREATED)
            .with_navigation(LOGIN_ROUTE)
    }

    /// Field by field, top to bottom: presence before shape.
    fn rules() -> Vec<ValidationRule<Self>> {
        vec![
            ValidationRule::required(|f: &Self| f.first_name.as_str(), FIRST_NAME_REQUIRED),
            ValidationRule::min_length(|f: &Self| f.first_name.as_str(), MIN_NAME_LENGTH, FIRST_NAME_TOO_SHORT),
            ValidationRule::required(|f: &Self| f.last_name.as_str(), LAST_NAME_REQUIRED),
            ValidationRule::min_length(|f: &Self| f.last_name.as_str(), MIN_NAME_LENGTH, LAST_NAME_TOO_SHORT),
            ValidationRule::required(|f: &Self| f.email.as_str(), EMAIL_REQUIRED),
            ValidationRule::pattern(|f: &Self| f.email.as_str(), &SIGNUP_EMAIL_RE, SIGNUP_INVALID_EMAIL),
            ValidationRule::required(|f: &Self| f.password.as_str(), PASSWORD_REQUIRED),
            ValidationRule::min_length(
                |f: &Self| f.password.as_str(),
                MIN_PASSWORD_LENGTH,
                SIGNUP_PASSWORD_TOO_SHORT,
            ),
            ValidationRule::required(|f: &Self| f.confirm_password.as_str(), CONFIRM_PASSWORD_REQUIRED),
            ValidationRule::fields_match(
                |f: &Self| f.confirm_password.as_str(),
                |f: &Self| f.password.as_str(),
                SIGNUP_PASSWORDS_DO_NOT_MATCH,
            ),
            ValidationRule::new(TERMS_NOT_ACCEPTED, |f: &Self| f.accept_terms),
        ]
    }

    fn payload(&self) -> Option<Value> {
        Some(json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "password": self.password,
        }))
    }
}

// =============================================================================
// Forgot password
// =============================================================================

/// Asks the server to email a password-reset code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl SubmissionForm for ForgotPasswordForm {
    fn action() -> FormAction {
        FormAction::post("forgot-password", FORGOT_PASSWORD_PATH)
            .with_success_message("Reset code has been sent to your email. Please check your inbox.")
            .with_rejected_prefix("Error sending reset code: ")
    }

    fn rules() -> Vec<ValidationRule<Self>> {
        vec![ValidationRule::email(|f: &Self| f.email.as_str())]
    }

    fn payload(&self) -> Option<Value> {
        Some(json!({ "email": self.email }))
    }
}

// =============================================================================
// Reset password
// =============================================================================

/// Sets a new password using the emailed code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// One-time code from the reset email.
    pub code: String,
}

impl SubmissionForm for ResetPasswordForm {
    fn action() -> FormAction {
        FormAction::post("reset-password", RESET_PASSWORD_PATH)
            .with_success_message("password has been reset. Please login to continue.")
            .with_rejected_prefix("Error resetting password: ")
            .with_navigation(LOGIN_ROUTE)
    }

    /// Match first, then code, then length, then email.
    fn rules() -> Vec<ValidationRule<Self>> {
        vec![
            ValidationRule::fields_match(
                |f: &Self| f.password.as_str(),
                |f: &Self| f.confirm_password.as_str(),
                PASSWORDS_DO_NOT_MATCH,
            ),
            ValidationRule::exact_length(|f: &Self| f.code.as_str(), OTP_LENGTH, INVALID_OTP),
            ValidationRule::min_length(|f: &Self| f.password.as_str(), MIN_PASSWORD_LENGTH, PASSWORD_TOO_SHORT),
            ValidationRule::email(|f: &Self| f.email.as_str()),
        ]
    }

    fn payload(&self) -> Option<Value> {
        Some(json!({
            "email": self.email,
            "new_password": self.password,
            "code": self.code,
        }))
    }
}

// =============================================================================
// Resend verification code
// =============================================================================

/// Asks for a fresh email-verification code. Body-less; the bearer token
/// identifies the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResendVerificationForm;

impl SubmissionForm for ResendVerificationForm {
    fn action() -> FormAction {
        FormAction::post("resend-verification", RESEND_VERIFICATION_PATH)
            .with_token()
            .with_success_message("A new verification code has been sent to your email.")
    }

    fn payload(&self) -> Option<Value> {
        None
    }
}
