//! The form-submission pipeline shared by every account screen.
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌───────────┐   ┌──────────┐   ┌──────────────┐
//! │ validate │──▶│ loading on │──▶│ transport │──▶│ classify │──▶│ loading off, │
//! │ (rules)  │   └────────────┘   │  (await)  │   └──────────┘   │ notify, nav  │
//! └────┬─────┘                    └───────────┘                  └──────────────┘
//!      │ first failing rule
//!      ▼
//!   notify + loading off, nothing sent
//! ```
//!
//! A screen describes itself with a [`SubmissionForm`] (endpoint, rules,
//! payload, messages) and shows results through a [`FormView`]. The
//! [`FormSubmitter`] owns the transport and runs the steps above exactly
//! once per call, producing exactly one notification.

pub mod debounce;
pub mod extract;

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{TransportError, TransportResult, ValidationFailure};
use crate::transport::{FormSubmissionRequest, HttpMethod, HttpResponse, Transport};
use crate::validation::{validate, ValidationRule};

pub use debounce::{DebounceTicket, Debouncer};
pub use extract::{extract, rejection_message, ServerError};

/// Default message when a request got no answer.
pub const NO_RESPONSE_MESSAGE: &str = "No response received from the server. Please try again.";

/// Message when an authenticated action is attempted without a token.
pub const NOT_LOGGED_IN_MESSAGE: &str = "You need to be logged in to do that.";

// =============================================================================
// Notifications and the view boundary
// =============================================================================

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "toast-success",
            Severity::Info => "toast-info",
            Severity::Warning => "toast-warning",
            Severity::Error => "toast-error",
        }
    }

    /// Emoji prefix for terminal display.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }
}

/// A short-lived, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

/// What the pipeline needs from a screen.
pub trait FormView {
    /// Show or hide the loading indicator.
    fn set_loading(&self, loading: bool);
    /// Display a transient notification.
    fn notify(&self, notification: Notification);
    /// Move to another screen.
    fn navigate(&self, route: &str);
}

/// A view that shows nothing. Used for background calls such as token
/// refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentView;

impl FormView for SilentView {
    fn set_loading(&self, _loading: bool) {}
    fn notify(&self, notification: Notification) {
        log::debug!("(silent) {}", notification.message);
    }
    fn navigate(&self, _route: &str) {}
}

// =============================================================================
// Form description
// =============================================================================

/// Endpoint and user-facing messages of one account action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAction {
    /// Short name for logs.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path below the API base URL.
    pub path: &'static str,
    /// Status that counts as success.
    pub success_status: u16,
    /// Send `Authorization: Bearer <token>`; refuse to submit without one.
    pub requires_token: bool,
    /// Shown on success. `None` shows nothing.
    pub success_message: Option<&'static str>,
    /// Prepended to the extracted server message.
    pub rejected_prefix: &'static str,
    /// Shown when the request got no answer.
    pub no_response_message: &'static str,
    /// Replaces the condition text of client errors when set.
    pub client_error_message: Option<&'static str>,
    /// Route to navigate to after success.
    pub navigate_to: Option<&'static str>,
}

impl FormAction {
    /// A POST action expecting `200 OK`, with default messages.
    pub fn post(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Post,
            path,
            success_status: 200,
            requires_token: false,
            success_message: None,
            rejected_prefix: "",
            no_response_message: NO_RESPONSE_MESSAGE,
            client_error_message: None,
            navigate_to: None,
        }
    }

    pub fn with_success_status(mut self, status: u16) -> Self {
        self.success_status = status;
        self
    }

    pub fn with_token(mut self) -> Self {
        self.requires_token = true;
        self
    }

    pub fn with_success_message(mut self, message: &'static str) -> Self {
        self.success_message = Some(message);
        self
    }

    pub fn with_rejected_prefix(mut self, prefix: &'static str) -> Self {
        self.rejected_prefix = prefix;
        self
    }

    pub fn with_no_response_message(mut self, message: &'static str) -> Self {
        self.no_response_message = message;
        self
    }

    pub fn with_client_error_message(mut self, message: &'static str) -> Self {
        self.client_error_message = Some(message);
        self
    }

    pub fn with_navigation(mut self, route: &'static str) -> Self {
        self.navigate_to = Some(route);
        self
    }
}

/// A screen's form: where it goes, what it checks, what it sends.
pub trait SubmissionForm: Sized {
    fn action() -> FormAction;

    /// Rules in evaluation order.
    fn rules() -> Vec<ValidationRule<Self>> {
        Vec::new()
    }

    /// JSON body, or `None` for body-less requests.
    fn payload(&self) -> Option<Value>;
}

// =============================================================================
// Outcomes
// =============================================================================

/// How a sent request resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Expected status; carries the decoded body (`Null` if empty).
    Success(Value),
    /// Any other HTTP response.
    ServerRejected { status: u16, message: String },
    /// Request went out, nothing came back.
    NoResponse,
    /// Request could not be made or its answer could not be read.
    ClientError(String),
}

impl SubmissionOutcome {
    /// Classify a transport result for `action`.
    pub fn classify(action: &FormAction, result: TransportResult<HttpResponse>) -> Self {
        match result {
            Ok(response) if response.status == action.success_status => {
                SubmissionOutcome::Success(response.json())
            }
            Ok(response) => SubmissionOutcome::ServerRejected {
                status: response.status,
                message: rejection_message(&response),
            },
            Err(TransportError::NoResponse(reason)) => {
                log::warn!("{}: no response ({})", action.name, reason);
                SubmissionOutcome::NoResponse
            }
            Err(TransportError::Client(reason)) => SubmissionOutcome::ClientError(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    /// Notification for this outcome under `action`'s messages.
    pub fn notification(&self, action: &FormAction) -> Option<Notification> {
        match self {
            SubmissionOutcome::Success(_) => action.success_message.map(Notification::success),
            SubmissionOutcome::ServerRejected { message, .. } => Some(Notification::error(format!(
                "{}{}",
                action.rejected_prefix, message
            ))),
            SubmissionOutcome::NoResponse => Some(Notification::error(action.no_response_message)),
            SubmissionOutcome::ClientError(reason) => Some(Notification::error(
                action.client_error_message.unwrap_or(reason.as_str()),
            )),
        }
    }

    /// Text describing the outcome, as the collaborators report it.
    pub fn message(&self, action: &FormAction) -> String {
        match self {
            SubmissionOutcome::Success(_) => "success".to_string(),
            other => other
                .notification(action)
                .map(|n| n.message)
                .unwrap_or_default(),
        }
    }
}

/// Everything a call to [`FormSubmitter::submit`] can end in.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A local rule failed; nothing was sent.
    Invalid(ValidationFailure),
    /// Another submission was in flight and the guard is on.
    Suppressed,
    /// The request resolved (or could not be made).
    Resolved(SubmissionOutcome),
}

impl Submission {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            Submission::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome().is_some_and(SubmissionOutcome::is_success)
    }
}

// =============================================================================
// Submitter
// =============================================================================

/// Runs submissions over one transport.
///
/// Keep one submitter per screen: the in-flight guard counts submissions on
/// this instance only.
pub struct FormSubmitter<T> {
    transport: T,
    config: ClientConfig,
    in_flight: AtomicUsize,
}

impl<T: Transport> FormSubmitter<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `true` while at least one request is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// The request `form` would send.
    pub fn request_for<F: SubmissionForm>(&self, form: &F, token: Option<&str>) -> FormSubmissionRequest {
        let action = F::action();
        let token = if action.requires_token { token } else { None };
        FormSubmissionRequest::new(action.method, self.config.endpoint(action.path))
            .with_payload(form.payload())
            .with_bearer(token)
    }

    /// Validate, send, classify and report one submission of `form`.
    pub async fn submit<F, V>(&self, form: &F, token: Option<&str>, view: &V) -> Submission
    where
        F: SubmissionForm,
        V: FormView + ?Sized,
    {
        let action = F::action();

        // A guarded submitter must not touch the indicator of the request
        // still running, so this check comes before any view update.
        if self.config.guard_in_flight && self.is_submitting() {
            log::warn!("{}: submission already in flight, ignoring trigger", action.name);
            return Submission::Suppressed;
        }

        if let Err(failure) = validate(form, &F::rules()) {
            log::debug!("{}: validation failed at rule {}: {}", action.name, failure.index, failure.message);
            view.set_loading(false);
            view.notify(Notification::error(failure.message.clone()));
            return Submission::Invalid(failure);
        }

        if action.requires_token && token.is_none() {
            view.set_loading(false);
            view.notify(Notification::error(NOT_LOGGED_IN_MESSAGE));
            return Submission::Resolved(SubmissionOutcome::ClientError(NOT_LOGGED_IN_MESSAGE.to_string()));
        }

        let Some(_in_flight) = self.enter() else {
            log::warn!("{}: submission already in flight, ignoring trigger", action.name);
            return Submission::Suppressed;
        };

        let request = self.request_for(form, token);
        let outcome = {
            let _loading = LoadingGuard::raise(view);
            let result = self.transport.send(&request).await;
            SubmissionOutcome::classify(&action, result)
        };

        log::info!("{}: {}", action.name, OutcomeKind::from(&outcome));
        if let Some(notification) = outcome.notification(&action) {
            view.notify(notification);
        }
        if outcome.is_success() {
            if let Some(route) = action.navigate_to {
                view.navigate(route);
            }
        }

        Submission::Resolved(outcome)
    }

    fn enter(&self) -> Option<InFlight<'_>> {
        let previous = self.in_flight.fetch_add(1, Ordering::AcqRel);
        if previous > 0 && self.config.guard_in_flight {
            self.in_flight.fetch_sub(1, Ordering::AcqRel);
            return None;
        }
        Some(InFlight(&self.in_flight))
    }
}

/// Decrements the in-flight count when a submission ends.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Holds the loading indicator on; clears it when dropped, whichever way
/// the submission ends.
struct LoadingGuard<'a, V: FormView + ?Sized>(&'a V);

impl<'a, V: FormView + ?Sized> LoadingGuard<'a, V> {
    fn raise(view: &'a V) -> Self {
        view.set_loading(true);
        Self(view)
    }
}

impl<V: FormView + ?Sized> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

/// Outcome without payloads, for logs.
enum OutcomeKind {
    Success,
    ServerRejected(u16),
    NoResponse,
    ClientError,
}

impl From<&SubmissionOutcome> for OutcomeKind {
    fn from(outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Success(_) => OutcomeKind::Success,
            SubmissionOutcome::ServerRejected { status, .. } => OutcomeKind::ServerRejected(*status),
            SubmissionOutcome::NoResponse => OutcomeKind::NoResponse,
            SubmissionOutcome::ClientError(_) => OutcomeKind::ClientError,
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeKind::Success => write!(f, "success"),
            OutcomeKind::ServerRejected(status) => write!(f, "rejected ({})", status),
            OutcomeKind::NoResponse => write!(f, "no response"),
            OutcomeKind::ClientError => write!(f, "client error"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport and recording view shared by the crate's tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        Loading(bool),
        Sent(String),
        Notify(Notification),
        Navigate(String),
    }

    pub type EventLog = Rc<RefCell<Vec<Event>>>;

    /// Replies with queued results and logs every request it sees.
    pub struct ScriptedTransport {
        replies: RefCell<VecDeque<TransportResult<HttpResponse>>>,
        pub requests: RefCell<Vec<FormSubmissionRequest>>,
        log: EventLog,
    }

    impl ScriptedTransport {
        pub fn new(log: &EventLog) -> Self {
            Self {
                replies: RefCell::new(VecDeque::new()),
                requests: RefCell::new(Vec::new()),
                log: log.clone(),
            }
        }

        pub fn reply(self, result: TransportResult<HttpResponse>) -> Self {
            self.replies.borrow_mut().push_back(result);
            self
        }

        pub fn sent(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: &FormSubmissionRequest) -> TransportResult<HttpResponse> {
            self.log.borrow_mut().push(Event::Sent(request.endpoint.clone()));
            self.requests.borrow_mut().push(request.clone());
            // Give concurrent submissions a chance to interleave.
            tokio::task::yield_now().await;
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Client("no scripted reply".into())))
        }
    }

    /// Records everything the pipeline shows.
    pub struct RecordingView {
        log: EventLog,
    }

    impl RecordingView {
        pub fn new(log: &EventLog) -> Self {
            Self { log: log.clone() }
        }

        pub fn notifications(&self) -> Vec<Notification> {
            self.log
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Notify(n) => Some(n.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn navigations(&self) -> Vec<String> {
            self.log
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Navigate(route) => Some(route.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn loading_states(&self) -> Vec<bool> {
            self.log
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Loading(on) => Some(*on),
                    _ => None,
                })
                .collect()
        }
    }

    impl FormView for RecordingView {
        fn set_loading(&self, loading: bool) {
            self.log.borrow_mut().push(Event::Loading(loading));
        }
        fn notify(&self, notification: Notification) {
            self.log.borrow_mut().push(Event::Notify(notification));
        }
        fn navigate(&self, route: &str) {
            self.log.borrow_mut().push(Event::Navigate(route.to_string()));
        }
    }

    pub fn harness(replies: Vec<TransportResult<HttpResponse>>) -> (FormSubmitter<ScriptedTransport>, RecordingView, EventLog) {
        harness_with(ClientConfig::default(), replies)
    }

    pub fn harness_with(
        config: ClientConfig,
        replies: Vec<TransportResult<HttpResponse>>,
    ) -> (FormSubmitter<ScriptedTransport>, RecordingView, EventLog) {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let transport = replies
            .into_iter()
            .fold(ScriptedTransport::new(&log), ScriptedTransport::reply);
        (FormSubmitter::new(transport, config), RecordingView::new(&log), log)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    struct EmailForm {
        email: String,
    }

    impl SubmissionForm for EmailForm {
        fn action() -> FormAction {
            FormAction::post("email", "/accounts/user/email")
                .with_success_message("Sent")
                .with_rejected_prefix("Error: ")
                .with_navigation("/done")
        }

        fn rules() -> Vec<ValidationRule<Self>> {
            vec![ValidationRule::email(|f: &EmailForm| f.email.as_str())]
        }

        fn payload(&self) -> Option<Value> {
            Some(json!({ "email": self.email }))
        }
    }

    struct TokenForm;

    impl SubmissionForm for TokenForm {
        fn action() -> FormAction {
            FormAction::post("token", "/accounts/user/token")
                .with_token()
                .with_client_error_message("Something broke")
        }

        fn payload(&self) -> Option<Value> {
            None
        }
    }

    fn valid() -> EmailForm {
        EmailForm {
            email: "ada@geoflip.io".into(),
        }
    }

    #[tokio::test]
    async fn test_success_notifies_and_navigates_once() {
        let (submitter, view, log) = harness(vec![Ok(HttpResponse::new(200, r#"{"ok":true}"#))]);

        let result = submitter.submit(&valid(), None, &view).await;

        assert_eq!(result, Submission::Resolved(SubmissionOutcome::Success(json!({"ok": true}))));
        assert_eq!(view.notifications(), vec![Notification::success("Sent")]);
        assert_eq!(view.navigations(), vec!["/done".to_string()]);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Loading(true),
                Event::Sent("http://localhost:5000/accounts/user/email".into()),
                Event::Loading(false),
                Event::Notify(Notification::success("Sent")),
                Event::Navigate("/done".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let (submitter, view, _log) = harness(vec![]);
        let form = EmailForm { email: "nope".into() };

        let result = submitter.submit(&form, None, &view).await;

        assert!(matches!(result, Submission::Invalid(ref f) if f.message == "Invalid email address"));
        assert_eq!(submitter.transport().sent(), 0);
        assert_eq!(view.loading_states(), vec![false]);
        assert_eq!(view.notifications(), vec![Notification::error("Invalid email address")]);
        assert!(view.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_rejection_uses_extracted_message() {
        let (submitter, view, _log) = harness(vec![
            Ok(HttpResponse::new(400, r#"{"message":"Unknown email"}"#)),
            Ok(HttpResponse::new(422, r#"{"errors":{"json":{"email":["Invalid"]}}}"#)),
        ]);

        let first = submitter.submit(&valid(), None, &view).await;
        let second = submitter.submit(&valid(), None, &view).await;

        assert_eq!(
            first.outcome(),
            Some(&SubmissionOutcome::ServerRejected {
                status: 400,
                message: "Unknown email".into()
            })
        );
        assert!(!second.is_success());
        assert_eq!(
            view.notifications(),
            vec![
                Notification::error("Error: Unknown email"),
                Notification::error("Error: email - Invalid"),
            ]
        );
        assert!(view.navigations().is_empty());
        assert_eq!(view.loading_states(), vec![true, false, true, false]);
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_rejection() {
        let (submitter, view, _log) = harness(vec![Ok(HttpResponse::new(201, r#"{"message":"created"}"#))]);

        let result = submitter.submit(&valid(), None, &view).await;

        assert!(matches!(
            result.outcome(),
            Some(SubmissionOutcome::ServerRejected { status: 201, .. })
        ));
    }

    #[tokio::test]
    async fn test_no_response_and_client_error() {
        let (submitter, view, _log) = harness(vec![
            Err(TransportError::NoResponse("connection refused".into())),
            Err(TransportError::Client("bad url".into())),
        ]);

        let first = submitter.submit(&valid(), None, &view).await;
        let second = submitter.submit(&valid(), None, &view).await;

        assert_eq!(first.outcome(), Some(&SubmissionOutcome::NoResponse));
        assert_eq!(second.outcome(), Some(&SubmissionOutcome::ClientError("bad url".into())));
        assert_eq!(
            view.notifications(),
            vec![Notification::error(NO_RESPONSE_MESSAGE), Notification::error("bad url")]
        );
        assert_eq!(view.loading_states(), vec![true, false, true, false]);
    }

    #[tokio::test]
    async fn test_token_is_sent_only_when_required() {
        let (submitter, view, _log) = harness(vec![
            Ok(HttpResponse::new(200, "")),
            Err(TransportError::Client("boom".into())),
        ]);

        submitter.submit(&TokenForm, Some("secret"), &view).await;
        let result = submitter.submit(&TokenForm, Some("secret"), &view).await;
        assert_eq!(result.outcome(), Some(&SubmissionOutcome::ClientError("boom".into())));
        assert_eq!(view.notifications(), vec![Notification::error("Something broke")]);

        let requests = submitter.transport().requests.borrow();
        assert_eq!(requests[0].header("Authorization"), Some("Bearer secret"));
        assert_eq!(requests[0].payload, None);

        let anonymous = submitter.request_for(&valid(), Some("secret"));
        assert_eq!(anonymous.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let (submitter, view, _log) = harness(vec![]);

        let result = submitter.submit(&TokenForm, None, &view).await;

        assert_eq!(
            result.outcome(),
            Some(&SubmissionOutcome::ClientError(NOT_LOGGED_IN_MESSAGE.into()))
        );
        assert_eq!(submitter.transport().sent(), 0);
        assert_eq!(view.loading_states(), vec![false]);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_without_guard() {
        let (submitter, view, _log) = harness(vec![Ok(HttpResponse::new(200, "")), Ok(HttpResponse::new(200, ""))]);
        let (first, second) = (valid(), valid());

        let (a, b) = tokio::join!(
            submitter.submit(&first, None, &view),
            submitter.submit(&second, None, &view)
        );

        assert!(a.is_success() && b.is_success());
        assert_eq!(submitter.transport().sent(), 2);
        assert!(!submitter.is_submitting());
    }

    #[tokio::test]
    async fn test_guard_suppresses_second_submission() {
        let config = ClientConfig::default().with_guard_in_flight(true);
        let (submitter, view, _log) = harness_with(config, vec![Ok(HttpResponse::new(200, ""))]);
        let (first, second) = (valid(), valid());

        let (a, b) = tokio::join!(
            submitter.submit(&first, None, &view),
            submitter.submit(&second, None, &view)
        );

        assert!(a.is_success());
        assert_eq!(b, Submission::Suppressed);
        assert_eq!(submitter.transport().sent(), 1);
        assert_eq!(view.notifications().len(), 1);
        assert!(!submitter.is_submitting());

        // The guard is released once the first submission resolves.
        let (submitter, view, _log) = harness_with(
            ClientConfig::default().with_guard_in_flight(true),
            vec![Ok(HttpResponse::new(200, "")), Ok(HttpResponse::new(200, ""))],
        );
        let form = valid();
        assert!(submitter.submit(&form, None, &view).await.is_success());
        assert!(submitter.submit(&form, None, &view).await.is_success());
    }

    #[tokio::test]
    async fn test_guard_keeps_loading_of_running_submission() {
        let config = ClientConfig::default().with_guard_in_flight(true);
        let (submitter, view, log) = harness_with(config, vec![Ok(HttpResponse::new(200, ""))]);
        let running = valid();
        let invalid = EmailForm { email: "nope".into() };

        let (a, b, c) = tokio::join!(
            submitter.submit(&running, None, &view),
            submitter.submit(&invalid, None, &view),
            submitter.submit(&TokenForm, None, &view)
        );

        assert!(a.is_success());
        assert_eq!(b, Submission::Suppressed);
        assert_eq!(c, Submission::Suppressed);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Loading(true),
                Event::Sent("http://localhost:5000/accounts/user/email".into()),
                Event::Loading(false),
                Event::Notify(Notification::success("Sent")),
                Event::Navigate("/done".into()),
            ]
        );
    }

    #[test]
    fn test_outcome_messages() {
        let action = EmailForm::action();
        assert_eq!(SubmissionOutcome::Success(Value::Null).message(&action), "success");
        assert_eq!(
            SubmissionOutcome::ServerRejected {
                status: 400,
                message: "nope".into()
            }
            .message(&action),
            "Error: nope"
        );
        assert_eq!(SubmissionOutcome::NoResponse.message(&action), NO_RESPONSE_MESSAGE);
    }
}
