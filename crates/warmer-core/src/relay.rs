//! Message relay between isolated contexts.
//!
//! Each context registers once and receives an [`Endpoint`] whose inbox
//! yields [`Envelope`]s. Notifications are fire-and-forget. Requests carry
//! a one-shot [`Responder`]; the requester holds the matching
//! [`PendingReply`], which resolves to exactly one reply or to an error
//! when the responder is dropped unanswered.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use warmer_protocols::{ContextKind, Message, RelayError};

type Inbox = mpsc::UnboundedSender<Envelope>;

/// A delivered message.
#[derive(Debug)]
pub struct Envelope {
    pub from: ContextKind,
    pub message: Message,
    /// Present only for requests.
    pub responder: Option<Responder>,
}

impl Envelope {
    pub fn is_request(&self) -> bool {
        self.responder.is_some()
    }
}

/// One-shot reply channel for a request.
#[derive(Debug)]
pub struct Responder {
    to: ContextKind,
    tx: oneshot::Sender<Message>,
}

impl Responder {
    pub fn requester(&self) -> ContextKind {
        self.to
    }

    /// Send the reply. A requester that has gone away is not an error.
    pub fn reply(self, message: Message) {
        let kind = message.kind_name();
        if self.tx.send(message).is_err() {
            debug!(to = %self.to, kind, "Requester gone, reply dropped");
        }
    }
}

/// The requester's side of a request.
#[derive(Debug)]
pub struct PendingReply {
    target: ContextKind,
    rx: oneshot::Receiver<Message>,
}

impl PendingReply {
    pub fn target(&self) -> ContextKind {
        self.target
    }

    /// Wait for the reply with no bound.
    pub async fn wait(self) -> Result<Message, RelayError> {
        self.rx.await.map_err(|_| RelayError::NoReply)
    }

    /// Wait for the reply for at most `timeout`.
    pub async fn wait_timeout(self, timeout: Duration) -> Result<Message, RelayError> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(message)) => Ok(message),
            Ok(Err(_)) => Err(RelayError::NoReply),
            Err(_) => {
                debug!(target_context = %self.target, ?timeout, "Reply timed out");
                Err(RelayError::Timeout(timeout))
            }
        }
    }
}

/// A registered context's inbox.
pub struct Endpoint {
    kind: ContextKind,
    inbox: mpsc::UnboundedReceiver<Envelope>,
    relay: MessageRelay,
}

impl Endpoint {
    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    /// Next delivered envelope, or `None` once this context is unregistered.
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.inbox.recv().await
    }

    pub fn relay(&self) -> &MessageRelay {
        &self.relay
    }

    pub fn notify(&self, target: ContextKind, message: Message) -> Result<(), RelayError> {
        self.relay.notify(self.kind, target, message)
    }

    pub fn request(&self, target: ContextKind, message: Message) -> Result<PendingReply, RelayError> {
        self.relay.request(self.kind, target, message)
    }

    /// Request and wait with the relay's configured reply timeout.
    pub async fn request_with_timeout(
        &self,
        target: ContextKind,
        message: Message,
    ) -> Result<Message, RelayError> {
        self.relay
            .request_with_timeout(self.kind, target, message, self.relay.reply_timeout())
            .await
    }
}

/// Routes messages to registered contexts.
///
/// Cheap to clone; clones share one routing table.
#[derive(Clone)]
pub struct MessageRelay {
    routes: Arc<RwLock<HashMap<ContextKind, Inbox>>>,
    reply_timeout: Duration,
}

impl MessageRelay {
    pub fn new(reply_timeout: Duration) -> Self {
        Self {
            routes: Arc::new(RwLock::new(HashMap::new())),
            reply_timeout,
        }
    }

    pub fn reply_timeout(&self) -> Duration {
        self.reply_timeout
    }

    /// Register a context. A previous registration of the same kind is
    /// replaced and its endpoint stops receiving.
    pub fn register(&self, kind: ContextKind) -> Endpoint {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.routes.write().insert(kind, tx).is_some() {
            debug!(context = %kind, "Replaced existing registration");
        }
        Endpoint {
            kind,
            inbox: rx,
            relay: self.clone(),
        }
    }

    pub fn unregister(&self, kind: ContextKind) {
        self.routes.write().remove(&kind);
    }

    pub fn is_registered(&self, kind: ContextKind) -> bool {
        self.routes
            .read()
            .get(&kind)
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Deliver a message without waiting for an answer. At most once.
    pub fn notify(
        &self,
        from: ContextKind,
        target: ContextKind,
        message: Message,
    ) -> Result<(), RelayError> {
        self.deliver(
            Envelope {
                from,
                message,
                responder: None,
            },
            target,
        )
    }

    /// Deliver a request and return the handle for its single reply.
    pub fn request(
        &self,
        from: ContextKind,
        target: ContextKind,
        message: Message,
    ) -> Result<PendingReply, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.deliver(
            Envelope {
                from,
                message,
                responder: Some(Responder { to: from, tx }),
            },
            target,
        )?;
        Ok(PendingReply { target, rx })
    }

    /// Deliver a request and wait at most `timeout` for the reply.
    pub async fn request_with_timeout(
        &self,
        from: ContextKind,
        target: ContextKind,
        message: Message,
        timeout: Duration,
    ) -> Result<Message, RelayError> {
        self.request(from, target, message)?
            .wait_timeout(timeout)
            .await
    }

    fn deliver(&self, envelope: Envelope, target: ContextKind) -> Result<(), RelayError> {
        let inbox = self
            .routes
            .read()
            .get(&target)
            .cloned()
            .ok_or(RelayError::TargetUnavailable(target))?;

        trace!(from = %envelope.from, to = %target, kind = envelope.message.kind_name(), "Relaying");
        inbox
            .send(envelope)
            .map_err(|_| RelayError::TargetUnavailable(target))
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
