//! Navigation guard.
//!
//! A pure decision function over the route table and the session flag: no
//! network traffic, no credential inspection. It can be optimistic (the flag
//! may be stale); the transport corrects any staleness the moment a request
//! actually fails.

use std::sync::Arc;

use tracing::debug;

use crate::flag::SessionFlagStore;
use crate::routes::RouteTable;

/// What the embedder should do with an attempted navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested path.
    Allow,
    /// Navigate to the contained path instead.
    RedirectTo(String),
}

/// Evaluates navigation attempts against the route table and session flag.
pub struct NavigationGuard {
    table: RouteTable,
    flag: Arc<dyn SessionFlagStore>,
}

impl NavigationGuard {
    /// Create a guard over `table`, consulting `flag` on every evaluation.
    #[must_use]
    pub fn new(table: RouteTable, flag: Arc<dyn SessionFlagStore>) -> Self {
        Self { table, flag }
    }

    /// Decide whether navigating to `path` is allowed.
    ///
    /// Rules, in order:
    /// 1. protected route without an established session: redirect to login;
    /// 2. login route with an established session: redirect to the home
    ///    route (no point logging in twice);
    /// 3. everything else, unknown paths included: allow.
    #[must_use]
    pub fn evaluate(&self, path: &str) -> GuardDecision {
        let active = self.flag.is_active();

        let decision = if self.table.requires_auth(path) && !active {
            GuardDecision::RedirectTo(self.table.login_route().to_string())
        } else if self.table.is_login(path) && active {
            GuardDecision::RedirectTo(self.table.home_route().to_string())
        } else {
            GuardDecision::Allow
        };

        debug!(path, active, ?decision, "navigation evaluated");
        decision
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for guard decisions.
    use super::*;
    use crate::flag::MemoryFlagStore;

    fn guard(active: bool) -> NavigationGuard {
        let flag = Arc::new(MemoryFlagStore::new());
        if active {
            flag.set();
        }
        NavigationGuard::new(RouteTable::nearsplit(), flag)
    }

    #[test]
    fn protected_route_without_session_redirects_to_login() {
        assert_eq!(guard(false).evaluate("/groups"), GuardDecision::RedirectTo("/login".into()));
        assert_eq!(
            guard(false).evaluate("/groups/5"),
            GuardDecision::RedirectTo("/login".into())
        );
    }

    #[test]
    fn protected_route_with_session_is_allowed() {
        assert_eq!(guard(true).evaluate("/groups"), GuardDecision::Allow);
        assert_eq!(guard(true).evaluate("/profile"), GuardDecision::Allow);
    }

    #[test]
    fn login_with_session_redirects_home() {
        assert_eq!(guard(true).evaluate("/login"), GuardDecision::RedirectTo("/groups".into()));
    }

    #[test]
    fn login_without_session_is_allowed() {
        assert_eq!(guard(false).evaluate("/login"), GuardDecision::Allow);
    }

    #[test]
    fn public_and_unknown_routes_are_allowed_either_way() {
        assert_eq!(guard(false).evaluate("/register"), GuardDecision::Allow);
        assert_eq!(guard(true).evaluate("/register"), GuardDecision::Allow);
        assert_eq!(guard(false).evaluate("/nowhere"), GuardDecision::Allow);
    }

    #[test]
    fn decision_tracks_flag_transitions() {
        let flag = Arc::new(MemoryFlagStore::new());
        let guard = NavigationGuard::new(RouteTable::nearsplit(), flag.clone());

        assert_eq!(guard.evaluate("/groups"), GuardDecision::RedirectTo("/login".into()));
        flag.set();
        assert_eq!(guard.evaluate("/groups"), GuardDecision::Allow);
        flag.clear();
        assert_eq!(guard.evaluate("/groups"), GuardDecision::RedirectTo("/login".into()));
    }
}
