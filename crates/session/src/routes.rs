//! Static route table.
//!
//! Declares which paths exist and which require an established session.
//! Paths may contain `:param` segments (`/groups/:id`). The table is plain
//! data consulted by the [`NavigationGuard`](crate::guard::NavigationGuard);
//! it performs no I/O.

/// One declared route.
#[derive(Debug, Clone)]
pub struct Route {
    /// Path pattern, with `:name` placeholders for dynamic segments.
    pub path: &'static str,
    /// Human-readable route name.
    pub name: &'static str,
    /// Whether the route requires an established session.
    pub requires_auth: bool,
}

impl Route {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: false }
    }

    const fn protected(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: true }
    }
}

/// Route table plus the two special routes the guard redirects to.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_route: String,
    home_route: String,
}

impl RouteTable {
    /// Build a table from explicit routes.
    #[must_use]
    pub fn new(
        routes: Vec<Route>,
        login_route: impl Into<String>,
        home_route: impl Into<String>,
    ) -> Self {
        Self { routes, login_route: login_route.into(), home_route: home_route.into() }
    }

    /// The NearSplit application's route table.
    #[must_use]
    pub fn nearsplit() -> Self {
        Self::new(
            vec![
                Route::public("/", "Root"),
                Route::protected("/home", "Home"),
                Route::public("/login", "Login"),
                Route::public("/register", "Register"),
                Route::protected("/groups", "GroupList"),
                Route::protected("/groups/:id", "GroupDetail"),
                Route::protected("/chat/:groupId", "Chat"),
                Route::protected("/profile", "Profile"),
                Route::protected("/products", "ProductList"),
                Route::protected("/products/new", "ProductCreate"),
                Route::protected("/checkout/:groupId", "Checkout"),
                Route::protected("/payment/success", "PaymentSuccess"),
                Route::protected("/payment/fail", "PaymentFail"),
            ],
            "/login",
            "/groups",
        )
    }

    /// Find the route matching `path`, if any.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| matches_pattern(route.path, path))
    }

    /// Whether `path` requires an established session. Unknown paths carry no
    /// protection requirement.
    #[must_use]
    pub fn requires_auth(&self, path: &str) -> bool {
        self.find(path).is_some_and(|route| route.requires_auth)
    }

    /// Whether `path` is the login route.
    #[must_use]
    pub fn is_login(&self, path: &str) -> bool {
        path == self.login_route
    }

    /// Login route path.
    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Default route for an authenticated user.
    #[must_use]
    pub fn home_route(&self) -> &str {
        &self.home_route
    }
}

/// Match a concrete path against a pattern with `:param` segments.
fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.trim_matches('/').split('/');
    let mut path_segments = path.trim_matches('/').split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if !expected.starts_with(':') && expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
