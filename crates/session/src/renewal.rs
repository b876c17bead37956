//! Single-flight credential renewal.
//!
//! When several in-flight requests fail with an expired credential at the
//! same time, exactly one renewal call goes to the server. The first failing
//! request becomes the leader and performs the renewal; every failing request
//! (leader included) parks in a FIFO queue and is replayed in arrival order
//! once the renewal succeeds. If it fails, the whole queue is drained with a
//! terminal auth failure and the session ends.
//!
//! All queue and flag mutations happen inside short synchronous lock
//! sections; the lock is never held across an await point.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::descriptor::RequestDescriptor;
use crate::outcome::{AuthFailureReason, FailurePayload, Outcome};
use crate::transport::SessionTransport;

pub(crate) struct RenewalCoordinator {
    state: Mutex<RenewalState>,
}

#[derive(Default)]
struct RenewalState {
    in_flight: bool,
    waiters: VecDeque<Waiter>,
}

struct Waiter {
    descriptor: RequestDescriptor,
    tx: oneshot::Sender<Outcome>,
}

impl RenewalCoordinator {
    pub(crate) fn new() -> Self {
        Self { state: Mutex::new(RenewalState::default()) }
    }

    /// Park `descriptor` until the credential has been renewed, then replay
    /// it and return the replay's outcome.
    ///
    /// The caller that finds no renewal in flight becomes the leader and
    /// drives the renewal; everyone else just waits on their channel.
    pub(crate) async fn coordinate(
        &self,
        transport: &SessionTransport,
        mut descriptor: RequestDescriptor,
    ) -> Outcome {
        descriptor.mark_retried();
        let (tx, rx) = oneshot::channel();

        let leader = {
            let mut state = self.state.lock();
            state.waiters.push_back(Waiter { descriptor, tx });
            let leader = !state.in_flight;
            state.in_flight = true;
            leader
        };

        if leader {
            self.run_renewal(transport).await;
        }

        match rx.await {
            Ok(outcome) => outcome,
            // The leader never drops a sender; this covers a panicking leader
            // task only.
            Err(_) => Outcome::NetworkError("renewal coordinator dropped the request".to_string()),
        }
    }

    async fn run_renewal(&self, transport: &SessionTransport) {
        debug!("renewing access credential");
        let renewal = transport.dispatch_renewal().await;

        if renewal.is_success() {
            debug!("credential renewed, replaying parked requests");
            loop {
                let waiter = {
                    let mut state = self.state.lock();
                    match state.waiters.pop_front() {
                        Some(waiter) => waiter,
                        None => {
                            // Reset in the same critical section that saw the
                            // queue empty, so a request parked after this
                            // point elects a fresh leader.
                            state.in_flight = false;
                            break;
                        }
                    }
                };
                let outcome = transport.resend(waiter.descriptor).await;
                // A closed receiver means the caller gave up waiting.
                let _ = waiter.tx.send(outcome);
            }
        } else {
            warn!(kind = renewal.kind(), "credential renewal failed, ending session");
            let drained = {
                let mut state = self.state.lock();
                state.in_flight = false;
                std::mem::take(&mut state.waiters)
            };

            transport.force_logout();

            let failure = renewal_failure_payload(renewal);
            for waiter in drained {
                let _ = waiter.tx.send(Outcome::AuthFailure {
                    reason: AuthFailureReason::CredentialInvalid,
                    failure: failure.clone(),
                });
            }
        }
    }
}

fn renewal_failure_payload(renewal: Outcome) -> FailurePayload {
    match renewal {
        Outcome::AuthFailure { failure, .. }
        | Outcome::Forbidden(failure)
        | Outcome::ClientError { failure, .. }
        | Outcome::ServerError { failure, .. } => failure,
        Outcome::Success(_) | Outcome::NetworkError(_) => FailurePayload::default(),
    }
}
