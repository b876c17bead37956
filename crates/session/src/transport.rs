//! Authenticated HTTP transport.
//!
//! Every request the application makes travels through [`SessionTransport`].
//! It resolves paths against the configured base URL, carries the access
//! credential in the client's ambient cookie jar (this crate never reads it),
//! classifies every response into an [`Outcome`], and on an expired
//! credential hands the request to the renewal coordinator for a single
//! transparent retry.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::descriptor::RequestDescriptor;
use crate::error::{Result, SessionError};
use crate::flag::{MemoryFlagStore, SessionFlagStore};
use crate::hooks::{NoopHooks, SessionHooks};
use crate::outcome::Outcome;
use crate::renewal::RenewalCoordinator;

/// Authenticated transport for the NearSplit API.
pub struct SessionTransport {
    client: reqwest::Client,
    config: SessionConfig,
    flag: Arc<dyn SessionFlagStore>,
    hooks: Arc<dyn SessionHooks>,
    renewal: RenewalCoordinator,
}

/// Builder for [`SessionTransport`].
///
/// Defaults: [`SessionConfig::default`], an in-memory flag store, and no-op
/// hooks.
#[derive(Default)]
pub struct SessionTransportBuilder {
    config: Option<SessionConfig>,
    flag: Option<Arc<dyn SessionFlagStore>>,
    hooks: Option<Arc<dyn SessionHooks>>,
}

impl SessionTransportBuilder {
    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `flag` as the session flag store.
    #[must_use]
    pub fn flag_store(mut self, flag: Arc<dyn SessionFlagStore>) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Use `hooks` for transport side effects.
    #[must_use]
    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Construct the transport.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<SessionTransport> {
        let config = self.config.unwrap_or_default();
        // The credential travels in a secure cookie; the jar carries it on
        // every request without this crate ever seeing its value.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()
            .map_err(|e| SessionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(SessionTransport {
            client,
            config,
            flag: self.flag.unwrap_or_else(|| Arc::new(MemoryFlagStore::new())),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(NoopHooks)),
            renewal: RenewalCoordinator::new(),
        })
    }
}

impl SessionTransport {
    /// Start building a transport.
    #[must_use]
    pub fn builder() -> SessionTransportBuilder {
        SessionTransportBuilder::default()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The session flag store this transport mutates on terminal auth
    /// failures. Login/logout wrappers use it to set and clear the flag.
    #[must_use]
    pub fn flag_store(&self) -> Arc<dyn SessionFlagStore> {
        Arc::clone(&self.flag)
    }

    /// Send one logical request and classify the response.
    ///
    /// An expired credential triggers a single-flight renewal followed by
    /// exactly one replay of this request; every other failure is returned
    /// as-is. The `on_outcome` hook fires once per call with the final
    /// outcome.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Outcome {
        let method = descriptor.method().clone();
        let path = descriptor.path().to_string();

        let outcome = self.execute(descriptor).await;

        debug!(%method, path, kind = outcome.kind(), "request completed");
        self.hooks.on_outcome(&method, &path, &outcome);
        outcome
    }

    async fn execute(&self, descriptor: RequestDescriptor) -> Outcome {
        match self.dispatch(&descriptor).await {
            Outcome::AuthFailure { reason, failure } => {
                if reason.is_renewable() && !descriptor.retried() {
                    self.renewal.coordinate(self, descriptor).await
                } else {
                    self.force_logout();
                    Outcome::AuthFailure { reason, failure }
                }
            }
            other => other,
        }
    }

    /// Replay a request after a successful renewal. A second auth failure on
    /// the replay is terminal, whatever its reason.
    pub(crate) async fn resend(&self, descriptor: RequestDescriptor) -> Outcome {
        let outcome = self.dispatch(&descriptor).await;
        if matches!(outcome, Outcome::AuthFailure { .. }) {
            self.force_logout();
        }
        outcome
    }

    /// Call the renewal endpoint. Goes straight to `dispatch`; a renewal must
    /// never re-enter the coordinator.
    pub(crate) async fn dispatch_renewal(&self) -> Outcome {
        self.dispatch(&RequestDescriptor::post_empty(self.config.renewal_path.clone())).await
    }

    /// Perform one HTTP exchange and classify the response. No retries, no
    /// side effects.
    pub(crate) async fn dispatch(&self, descriptor: &RequestDescriptor) -> Outcome {
        let url = self.config.url_for(descriptor.path());
        let mut request = self.client.request(descriptor.method().clone(), &url);
        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Outcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Outcome::NetworkError(format!("failed to read response body: {e}")),
        };

        if status.is_success() {
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                // Some endpoints answer 2xx with a non-JSON (or empty) body.
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            Outcome::Success(value)
        } else {
            let failure = serde_json::from_slice(&bytes).unwrap_or_default();
            Outcome::classify(status, failure)
        }
    }

    /// End the session: clear the flag and, if it was set, fire the redirect
    /// and notice hooks. The flag transition is the dedup gate, so concurrent
    /// terminal failures produce the side effects exactly once.
    pub(crate) fn force_logout(&self) {
        if self.flag.clear() {
            info!("session ended, redirecting to login");
            self.hooks.redirect_to_login(&self.config.login_route);
            self.hooks.notify_session_expired();
        }
    }

    /// GET `path` and decode the response body.
    ///
    /// # Errors
    /// Any non-success outcome, or a body that does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(RequestDescriptor::get(path)).await
    }

    /// POST `body` to `path` and decode the response body.
    ///
    /// # Errors
    /// Any non-success outcome, a body that does not serialize, or a
    /// response that does not decode into `R`.
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        self.request(RequestDescriptor::post(path, body)?).await
    }

    /// POST to `path` with no body and decode the response.
    ///
    /// # Errors
    /// Any non-success outcome, or a response that does not decode into `R`.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.request(RequestDescriptor::post_empty(path)).await
    }

    /// PATCH `body` to `path` and decode the response body.
    ///
    /// # Errors
    /// Any non-success outcome, a body that does not serialize, or a
    /// response that does not decode into `R`.
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        self.request(RequestDescriptor::patch(path, body)?).await
    }

    /// PATCH `path` with no body and decode the response.
    ///
    /// # Errors
    /// Any non-success outcome, or a response that does not decode into `R`.
    pub async fn patch_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.request(RequestDescriptor::patch_empty(path)).await
    }

    /// DELETE `path` and decode the response body.
    ///
    /// # Errors
    /// Any non-success outcome, or a response that does not decode into `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(RequestDescriptor::delete(path)).await
    }

    async fn request<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        let value = self.send(descriptor).await.into_result()?;
        serde_json::from_value(value)
            .map_err(|e| SessionError::Serialization(format!("failed to decode response: {e}")))
    }
}
