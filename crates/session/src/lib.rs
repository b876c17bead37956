//! Client-side session layer for the NearSplit API.
//!
//! Sits between application code and the remote API: every outgoing request
//! travels through the [`SessionTransport`], which transparently renews an
//! expired short-lived access credential using the longer-lived renewal
//! credential, retries the original request exactly once after a successful
//! renewal, and otherwise forces the user back to the login entry point.
//! A companion [`NavigationGuard`] keeps protected views unreachable until a
//! session has been established.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   SessionTransport   │  send(descriptor) -> Outcome
//! └──────────┬───────────┘
//!            │
//!            ├──► RenewalCoordinator   (single-flight credential renewal)
//!            ├──► SessionFlagStore     ("a session was established" flag)
//!            └──► SessionHooks         (telemetry / redirect side effects)
//!
//! ┌──────────────────────┐
//! │   NavigationGuard    │  evaluate(route) -> GuardDecision
//! └──────────────────────┘  pure function of (route table, session flag)
//! ```
//!
//! The credential itself is never touched by this crate: it travels in an
//! opaque secure cookie managed by the HTTP client's ambient cookie jar.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use nearsplit_session::{
//!     MemoryFlagStore, NavigationGuard, RequestDescriptor, RouteTable, SessionConfig,
//!     SessionTransport,
//! };
//!
//! # async fn example() -> Result<(), nearsplit_session::SessionError> {
//! let flag = Arc::new(MemoryFlagStore::new());
//! let transport = SessionTransport::builder()
//!     .config(SessionConfig::from_env()?)
//!     .flag_store(flag.clone())
//!     .build()?;
//!
//! let outcome = transport.send(RequestDescriptor::get("/users/me")).await;
//!
//! let guard = NavigationGuard::new(RouteTable::nearsplit(), flag);
//! let decision = guard.evaluate("/groups");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod flag;
pub mod guard;
pub mod hooks;
pub mod messages;
pub mod outcome;
mod renewal;
pub mod routes;
pub mod testing;
pub mod transport;

pub use config::SessionConfig;
pub use descriptor::RequestDescriptor;
pub use error::{Result, SessionError};
pub use flag::{FileFlagStore, MemoryFlagStore, SessionFlagStore};
pub use guard::{GuardDecision, NavigationGuard};
pub use hooks::{NoopHooks, SessionHooks};
pub use messages::{describe_error, normalize_failure};
pub use outcome::{AuthFailureReason, FailurePayload, Outcome};
// Re-exported so callers can build descriptors without a direct reqwest
// dependency.
pub use reqwest::Method;
pub use routes::{Route, RouteTable};
pub use transport::{SessionTransport, SessionTransportBuilder};
