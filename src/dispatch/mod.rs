//! Request lifecycle coordination for assistant commands
//!
//! At most one assistant request is tracked at a time. Each dispatch mints a
//! monotonically increasing request id paired with its own cancellation
//! token; the id travels with the settlement event so that a superseded
//! request can never overwrite state owned by a newer one.
//!
//! Dispatching while a request is still pending cancels the predecessor's
//! token before replacing it, so the old request settles as `Canceled`
//! instead of racing the new one.

use crate::api::{AssistantClient, CommandResponse};
use crossbeam_channel::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Fixed message rendered when the user stops a pending request.
pub const STOPPED_MESSAGE: &str = "Response generation stopped.";

/// Generic user-facing message for failed requests; detail goes to the log.
pub const FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";

/// Observable state of the send control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    /// No request in flight; a click dispatches the manual input
    #[default]
    Idle,
    /// A request is in flight; a click cancels it
    Pending,
}

impl SendState {
    /// Label rendered on the send control.
    pub fn label(self) -> &'static str {
        match self {
            SendState::Idle => "Send",
            SendState::Pending => "Stop",
        }
    }

    /// Check if a request is in flight
    pub fn is_pending(self) -> bool {
        matches!(self, SendState::Pending)
    }
}

/// A command to send to the backend
#[derive(Debug, Clone)]
pub enum CommandPayload {
    /// Voice capture request (empty body to `/listen`)
    Voice,
    /// Manual text command (`{command}` to `/command`)
    Manual(String),
}

/// How a dispatched request settled
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The backend answered
    Success(CommandResponse),
    /// The request was canceled before the response arrived
    Canceled,
    /// Transport or decode failure; the detail has been logged
    Failed(String),
}

/// Settlement notification for a dispatched request
#[derive(Debug, Clone)]
pub struct DispatchEvent {
    /// Id of the request this event settles
    pub request_id: u64,
    pub outcome: DispatchOutcome,
}

/// The tracked in-flight request: its identity plus cancellation handle.
#[derive(Debug)]
struct ActiveRequest {
    id: u64,
    cancel: CancellationToken,
}

/// Tracks the in-flight assistant request and dispatches new ones
pub struct Dispatcher {
    client: AssistantClient,
    runtime: tokio::runtime::Handle,
    event_tx: Sender<DispatchEvent>,
    active: Option<ActiveRequest>,
    next_id: u64,
}

impl Dispatcher {
    /// Create a dispatcher that spawns requests on the given runtime and
    /// reports settlements on `event_tx`.
    pub fn new(
        client: AssistantClient,
        runtime: tokio::runtime::Handle,
        event_tx: Sender<DispatchEvent>,
    ) -> Self {
        Self {
            client,
            runtime,
            event_tx,
            active: None,
            next_id: 1,
        }
    }

    /// Id of the currently tracked request, if any.
    pub fn current_request(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Send a command to the backend.
    ///
    /// Returns the new request's id, or `None` when the payload is a
    /// whitespace-only manual command (a silent no-op). Any still-pending
    /// predecessor is canceled and replaced.
    pub fn dispatch(&mut self, payload: CommandPayload) -> Option<u64> {
        if let CommandPayload::Manual(ref text) = payload {
            if text.trim().is_empty() {
                return None;
            }
        }

        // A superseded request must not settle as if it were current.
        if let Some(previous) = self.active.take() {
            debug!("Superseding request {}, canceling it", previous.id);
            previous.cancel.cancel();
        }

        let id = self.next_id;
        self.next_id += 1;
        let token = CancellationToken::new();
        self.active = Some(ActiveRequest {
            id,
            cancel: token.clone(),
        });

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let request = async {
                match payload {
                    CommandPayload::Voice => client.listen().await,
                    CommandPayload::Manual(text) => client.command(&text).await,
                }
            };

            let outcome = tokio::select! {
                _ = token.cancelled() => DispatchOutcome::Canceled,
                result = request => match result {
                    Ok(response) => DispatchOutcome::Success(response),
                    Err(e) => {
                        error!("Assistant request {} failed: {}", id, e);
                        DispatchOutcome::Failed(e.to_string())
                    }
                },
            };

            let _ = event_tx.send(DispatchEvent {
                request_id: id,
                outcome,
            });
        });

        Some(id)
    }

    /// Signal cancellation on the active request.
    ///
    /// The button state is not touched here; the pending request's
    /// settlement event performs the reset. Returns false (a no-op) when no
    /// request is active.
    pub fn cancel(&mut self) -> bool {
        match &self.active {
            Some(active) => {
                debug!("Canceling request {}", active.id);
                active.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Settle a request by id.
    ///
    /// Returns true iff the id matches the tracked active request, clearing
    /// it. A false return means the event belongs to a superseded request
    /// and its outcome must not touch shared UI state.
    pub fn settle(&mut self, request_id: u64) -> bool {
        match &self.active {
            Some(active) if active.id == request_id => {
                self.active = None;
                true
            }
            _ => {
                debug!("Ignoring stale settlement for request {}", request_id);
                false
            }
        }
    }
}
