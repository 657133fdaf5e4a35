//! Client-side form validation.
//!
//! A form is checked against an ordered list of [`ValidationRule`]s. The
//! first failing rule wins: its message is reported and the rules after it
//! are never evaluated. Nothing is sent to the server when a rule fails.
//!
//! # Example
//!
//! ```rust
//! use geoflip_client::validation::{validate, ValidationRule};
//!
//! struct Signup { email: String, password: String }
//!
//! let rules = vec![
//!     ValidationRule::email(|f: &Signup| f.email.as_str()),
//!     ValidationRule::min_length(|f: &Signup| f.password.as_str(), 8, "Password too short"),
//! ];
//!
//! let form = Signup { email: "ada@example.com".into(), password: "short".into() };
//! let failure = validate(&form, &rules).unwrap_err();
//! assert_eq!(failure.message, "Password too short");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationFailure;

/// Anything without whitespace or `@`, an `@`, then a dotted domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Message for [`ValidationRule::email`].
pub const INVALID_EMAIL: &str = "Invalid email address";

/// Reads one text field out of a form.
pub type Field<F> = fn(&F) -> &str;

/// A predicate over a form plus the message shown when it fails.
pub struct ValidationRule<F> {
    message: String,
    check: Box<dyn Fn(&F) -> bool>,
}

impl<F> ValidationRule<F> {
    /// Rule from an arbitrary predicate; `check` returns `true` when valid.
    pub fn new(message: impl Into<String>, check: impl Fn(&F) -> bool + 'static) -> Self {
        Self {
            message: message.into(),
            check: Box::new(check),
        }
    }

    /// Field must look like an email address.
    pub fn email(field: Field<F>) -> Self
    where
        F: 'static,
    {
        Self::new(INVALID_EMAIL, move |form| is_valid_email(field(form)))
    }

    /// Field must not be empty.
    pub fn required(field: Field<F>, message: impl Into<String>) -> Self
    where
        F: 'static,
    {
        Self::new(message, move |form| !field(form).is_empty())
    }

    /// Field must match `pattern`.
    pub fn pattern(field: Field<F>, pattern: &'static Regex, message: impl Into<String>) -> Self
    where
        F: 'static,
    {
        Self::new(message, move |form| pattern.is_match(field(form)))
    }

    /// Field must hold at least `min` characters.
    pub fn min_length(field: Field<F>, min: usize, message: impl Into<String>) -> Self
    where
        F: 'static,
    {
        Self::new(message, move |form| field(form).chars().count() >= min)
    }

    /// Field must hold exactly `len` characters.
    pub fn exact_length(field: Field<F>, len: usize, message: impl Into<String>) -> Self
    where
        F: 'static,
    {
        Self::new(message, move |form| field(form).chars().count() == len)
    }

    /// Two fields must be identical (password / confirmation).
    pub fn fields_match(first: Field<F>, second: Field<F>, message: impl Into<String>) -> Self
    where
        F: 'static,
    {
        Self::new(message, move |form| first(form) == second(form))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` when the form passes this rule.
    pub fn check(&self, form: &F) -> bool {
        (self.check)(form)
    }
}

impl<F> std::fmt::Debug for ValidationRule<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Check `form` against `rules` in order, stopping at the first failure.
pub fn validate<F>(form: &F, rules: &[ValidationRule<F>]) -> Result<(), ValidationFailure> {
    match rules.iter().position(|rule| !rule.check(form)) {
        Some(index) => Err(ValidationFailure {
            index,
            message: rules[index].message.clone(),
        }),
        None => Ok(()),
    }
}

/// Email syntax check used by [`ValidationRule::email`].
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Pair {
        a: String,
        b: String,
    }

    fn pair(a: &str, b: &str) -> Pair {
        Pair {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@geoflip.io"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("ada@geoflip"));
        assert!(!is_valid_email("ada geoflip@x.io"));
        assert!(!is_valid_email("@x.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_length_rules_count_chars() {
        let min = ValidationRule::min_length(|p: &Pair| p.a.as_str(), 3, "short");
        assert!(min.check(&pair("héé", "")));
        assert!(!min.check(&pair("hé", "")));

        let exact = ValidationRule::exact_length(|p: &Pair| p.a.as_str(), 6, "Invalid OTP");
        assert!(exact.check(&pair("123456", "")));
        assert!(!exact.check(&pair("12345", "")));
        assert!(!exact.check(&pair("1234567", "")));
    }

    #[test]
    fn test_required_and_pattern() {
        static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

        let required = ValidationRule::required(|p: &Pair| p.a.as_str(), "missing");
        assert!(required.check(&pair("x", "")));
        assert!(!required.check(&pair("", "")));

        let digits = ValidationRule::pattern(|p: &Pair| p.a.as_str(), &DIGITS, "digits only");
        assert!(digits.check(&pair("123", "")));
        assert!(!digits.check(&pair("12a", "")));
    }

    #[test]
    fn test_first_failure_wins() {
        let rules = vec![
            ValidationRule::fields_match(|p: &Pair| p.a.as_str(), |p: &Pair| p.b.as_str(), "mismatch"),
            ValidationRule::min_length(|p: &Pair| p.a.as_str(), 8, "too short"),
        ];

        let failure = validate(&pair("abc", "abd"), &rules).unwrap_err();
        assert_eq!(failure.index, 0);
        assert_eq!(failure.message, "mismatch");

        let failure = validate(&pair("abc", "abc"), &rules).unwrap_err();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.message, "too short");

        assert!(validate(&pair("abcdefgh", "abcdefgh"), &rules).is_ok());
    }

    #[test]
    fn test_later_rules_not_evaluated() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let rules = vec![
            ValidationRule::new("always fails", |_: &Pair| false),
            ValidationRule::new("counts", move |_: &Pair| {
                counter.set(counter.get() + 1);
                true
            }),
        ];

        assert!(validate(&pair("", ""), &rules).is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_empty_rules_pass() {
        let rules: Vec<ValidationRule<Pair>> = Vec::new();
        assert!(validate(&pair("", ""), &rules).is_ok());
    }
}
