//! Test doubles for the session layer.
//!
//! [`RecordingHooks`] captures every hook invocation so tests can assert on
//! side-effect counts and ordering. Usable from both this crate's tests and
//! downstream crates.

use parking_lot::Mutex;
use reqwest::Method;

use crate::hooks::SessionHooks;
use crate::outcome::Outcome;

/// One recorded `on_outcome` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOutcome {
    /// HTTP method of the request.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Outcome tag (see [`Outcome::kind`]).
    pub kind: &'static str,
}

/// Hooks implementation that records every invocation.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    outcomes: Mutex<Vec<RecordedOutcome>>,
    redirects: Mutex<Vec<String>>,
    notices: Mutex<usize>,
}

impl RecordingHooks {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded outcomes, in invocation order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<RecordedOutcome> {
        self.outcomes.lock().clone()
    }

    /// Login routes passed to `redirect_to_login`, in invocation order.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().clone()
    }

    /// Number of `notify_session_expired` invocations.
    #[must_use]
    pub fn notice_count(&self) -> usize {
        *self.notices.lock()
    }
}

impl SessionHooks for RecordingHooks {
    fn on_outcome(&self, method: &Method, path: &str, outcome: &Outcome) {
        self.outcomes.lock().push(RecordedOutcome {
            method: method.clone(),
            path: path.to_string(),
            kind: outcome.kind(),
        });
    }

    fn redirect_to_login(&self, login_route: &str) {
        self.redirects.lock().push(login_route.to_string());
    }

    fn notify_session_expired(&self) {
        *self.notices.lock() += 1;
    }
}
