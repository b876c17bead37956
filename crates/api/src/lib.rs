//! Typed resource wrappers for the NearSplit API.
//!
//! Thin request builders and response DTOs over the session transport. All
//! auth handling (credential renewal, forced logout) lives in
//! `nearsplit-session`; this crate only shapes requests and decodes bodies.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use nearsplit_api::ApiClient;
//! use nearsplit_session::SessionTransport;
//!
//! # async fn example() -> Result<(), nearsplit_session::SessionError> {
//! let transport = Arc::new(SessionTransport::builder().build()?);
//! let client = ApiClient::new(transport);
//!
//! let groups = client.groups().list(0, 10).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

use std::sync::Arc;

use nearsplit_session::SessionTransport;

pub mod auth;
pub mod groups;
pub mod notifications;
pub mod page;
pub mod products;
pub mod users;

pub use auth::AuthApi;
pub use groups::GroupsApi;
pub use notifications::NotificationsApi;
pub use page::Page;
pub use products::ProductsApi;
pub use users::UsersApi;

/// Entry point for all resource wrappers, sharing one transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<SessionTransport>,
}

impl ApiClient {
    /// Wrap a transport.
    #[must_use]
    pub fn new(transport: Arc<SessionTransport>) -> Self {
        Self { transport }
    }

    /// The underlying transport, for requests this crate has no wrapper for.
    #[must_use]
    pub fn transport(&self) -> &SessionTransport {
        &self.transport
    }

    /// Registration, login and logout.
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.transport)
    }

    /// The current user's profile.
    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.transport)
    }

    /// Split-purchase groups and participation.
    #[must_use]
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(&self.transport)
    }

    /// Product catalogue.
    #[must_use]
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.transport)
    }

    /// Per-user notifications.
    #[must_use]
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(&self.transport)
    }
}
