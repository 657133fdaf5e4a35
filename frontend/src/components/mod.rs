//! UI Components for the Geoflip account screens.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with the signed-in user and logout
//! - [`Footer`] - Page footer
//! - [`ToastStack`] - Transient notifications
//! - [`LoadingBackdrop`] - Full-screen loading indicator
//!
//! # Screens
//! - [`LoginPage`] - Debounced login, with [`ForgotPasswordDialog`]
//! - [`SignupPage`] - Account creation
//! - [`ResetPasswordPage`] - New password from an emailed code
//! - [`HomePage`] - Verification and exports for the signed-in user
//! - [`VerifyPage`] - Verification on its own
//!
//! # Panels
//! - [`VerificationPanel`] - Confirm or resend the email code
//! - [`ExportsPanel`] - Session export jobs

mod exports;
mod footer;
mod header;
mod home;
mod loader;
mod login;
mod reset_password;
mod signup;
mod toasts;
mod verification;

pub use exports::*;
pub use footer::*;
pub use header::*;
pub use home::*;
pub use loader::*;
pub use login::*;
pub use reset_password::*;
pub use signup::*;
pub use toasts::*;
pub use verification::*;
