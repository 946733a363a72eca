//! Handlers for the three execution contexts.
//!
//! - **Background** owns the settings and the completion client. It serves
//!   generation requests and drives the context-menu flow.
//! - **Content** lives next to the page and shows what the background
//!   sends it on a [`Surface`].
//! - **Popup** asks the background for a reply and waits for it, showing
//!   any notifications that arrive meanwhile.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use warmer_protocols::{
    Action, ContextKind, GenerationError, GenerationResult, Message, RelayError, Severity,
    ValidationError,
};

use crate::generator::Generator;
use crate::relay::{Endpoint, Envelope, MessageRelay, PendingReply};

const LOADING_TITLE: &str = "Generating Response";
const LOADING_MESSAGE: &str = "Please wait while we generate your response...";

/// Where notifications and generated replies are shown to the user.
pub trait Surface: Send + Sync {
    fn notify(&self, severity: Severity, title: &str, message: &str);

    fn show_response(&self, text: &str);
}

/// The privileged context.
pub struct BackgroundService {
    relay: MessageRelay,
    generator: Arc<Generator>,
}

impl BackgroundService {
    pub fn new(relay: MessageRelay, generator: Arc<Generator>) -> Self {
        Self { relay, generator }
    }

    /// Serve requests until the endpoint is unregistered.
    ///
    /// Each request runs on its own task so the inbox keeps draining while
    /// a completion call is in flight.
    pub async fn serve(self: Arc<Self>, mut endpoint: Endpoint) {
        info!(context = %endpoint.kind(), "Background context serving");
        while let Some(envelope) = endpoint.recv().await {
            self.dispatch(envelope);
        }
        debug!("Background inbox closed");
    }

    fn dispatch(&self, envelope: Envelope) {
        let Envelope {
            from,
            message,
            responder,
        } = envelope;

        let (Message::Request { action: Action::Generate, payload }, Some(responder)) =
            (message, responder)
        else {
            debug!(%from, "Ignoring non-request message");
            return;
        };

        let span = info_span!("generate", request_id = %Uuid::new_v4(), %from);
        let generator = Arc::clone(&self.generator);
        tokio::spawn(
            async move {
                let result = generator.generate(&payload).await;
                if let Err(e) = &result {
                    warn!(kind = %e.kind(), "Generation failed: {}", e);
                }
                responder.reply(Message::from(result));
            }
            .instrument(span),
        );
    }

    /// Context-menu flow: generate a reply to the selected text and show it
    /// in the content context.
    pub async fn on_selection(&self, text: &str) -> GenerationResult {
        self.selection_flow(text)
            .instrument(info_span!("selection", request_id = %Uuid::new_v4()))
            .await
    }

    async fn selection_flow(&self, text: &str) -> GenerationResult {
        let snapshot = match self.generator.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => return self.fail(e),
        };

        if snapshot.credential.is_none() {
            return self.fail(ValidationError::MissingCredential.into());
        }

        self.send_to_content(Message::notification(
            Severity::Loading,
            LOADING_TITLE,
            LOADING_MESSAGE,
        ));

        match self.generator.generate_from(&snapshot, text).await {
            Ok(reply) => {
                self.send_to_content(Message::response_ready(reply.clone()));
                GenerationResult::success(reply)
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: GenerationError) -> GenerationResult {
        warn!(kind = %error.kind(), "Selection flow failed: {}", error);
        self.send_to_content(Message::failure(&error));
        GenerationResult::from_error(&error)
    }

    fn send_to_content(&self, message: Message) {
        if let Err(e) = self
            .relay
            .notify(ContextKind::Background, ContextKind::Content, message)
        {
            warn!("Could not deliver to content context: {}", e);
        }
    }
}

/// The per-page context.
pub struct ContentContext {
    endpoint: Endpoint,
    surface: Arc<dyn Surface>,
}

impl ContentContext {
    pub fn new(endpoint: Endpoint, surface: Arc<dyn Surface>) -> Self {
        Self { endpoint, surface }
    }

    /// Route every delivered message until the endpoint is unregistered.
    pub async fn run(mut self) {
        while let Some(envelope) = self.endpoint.recv().await {
            self.route(envelope.message);
        }
    }

    /// Route delivered messages until one settles the current flow: a
    /// reply or an error notification.
    pub async fn until_settled(&mut self) -> Option<GenerationResult> {
        while let Some(envelope) = self.endpoint.recv().await {
            let settled = match &envelope.message {
                Message::ResponseReady { text } => Some(GenerationResult::success(text.clone())),
                Message::Notification {
                    severity: Severity::Error,
                    ..
                } => envelope.message.clone().into_generation_result().ok(),
                _ => None,
            };
            self.route(envelope.message);
            if settled.is_some() {
                return settled;
            }
        }
        None
    }

    /// Show one message on the surface. Requests are not served here.
    pub fn route(&self, message: Message) {
        show(self.surface.as_ref(), message);
    }
}

fn show(surface: &dyn Surface, message: Message) {
    match message {
        Message::Notification {
            severity,
            title,
            message,
            ..
        } => surface.notify(severity, &title, &message),
        Message::ResponseReady { text } => surface.show_response(&text),
        Message::Request { .. } => debug!("Requests are only served by the background"),
    }
}

/// The transient popup context.
pub struct PopupContext {
    endpoint: Endpoint,
    surface: Arc<dyn Surface>,
}

impl PopupContext {
    pub fn new(endpoint: Endpoint, surface: Arc<dyn Surface>) -> Self {
        Self { endpoint, surface }
    }

    /// Ask the background for a reply and wait with the relay's timeout.
    ///
    /// Notifications delivered to the popup while it waits are shown on
    /// its surface.
    pub async fn generate(&mut self, text: &str) -> GenerationResult {
        if text.trim().is_empty() {
            return GenerationResult::from_error(&ValidationError::EmptySourceText.into());
        }

        let reply = match self
            .endpoint
            .request(ContextKind::Background, Message::generate(text))
        {
            Ok(pending) => self.wait_routing(pending).await,
            Err(e) => Err(e),
        }
        .and_then(Message::into_generation_result);

        match reply {
            Ok(result) => result,
            Err(e) => {
                warn!("No usable reply from background: {}", e);
                GenerationResult::from_error(&GenerationError::from(e))
            }
        }
    }

    async fn wait_routing(&mut self, pending: PendingReply) -> Result<Message, RelayError> {
        let timeout = self.endpoint.relay().reply_timeout();
        let reply = pending.wait_timeout(timeout);
        tokio::pin!(reply);

        loop {
            tokio::select! {
                result = &mut reply => return result,
                Some(envelope) = self.endpoint.recv() => {
                    show(self.surface.as_ref(), envelope.message);
                }
            }
        }
    }

    /// Show one message on the surface.
    pub fn route(&self, message: Message) {
        show(self.surface.as_ref(), message);
    }
}

#[cfg(test)]
#[path = "contexts_tests.rs"]
mod tests;
