//! Side-effect hooks invoked by the transport.
//!
//! Redirects and user notices are explicit, injectable callbacks rather than
//! hard-wired UI calls, so the transport can be unit-tested with a recording
//! implementation (see [`crate::testing::RecordingHooks`]).

use reqwest::Method;

use crate::outcome::Outcome;

/// Observer for transport side effects.
///
/// `on_outcome` is purely diagnostic and must never affect control flow.
/// `redirect_to_login` and `notify_session_expired` fire at most once per
/// terminal auth event, however many requests failed concurrently.
pub trait SessionHooks: Send + Sync {
    /// Called once per logical request with its final outcome.
    fn on_outcome(&self, method: &Method, path: &str, outcome: &Outcome) {
        let _ = (method, path, outcome);
    }

    /// The session is over; the UI should navigate to the login route.
    fn redirect_to_login(&self, login_route: &str) {
        let _ = login_route;
    }

    /// One-shot notice explaining the forced logout to the user.
    fn notify_session_expired(&self) {}
}

/// Hooks implementation that does nothing. Default for embedders that only
/// want the transport's return values.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}
