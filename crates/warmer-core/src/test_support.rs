//! Test doubles shared by the core test modules.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use warmer_protocols::{
    ChatRequest, CompletionClient, Credential, ModelParams, ProviderError,
};

type Responder = Box<dyn Fn() -> Result<String, ProviderError> + Send + Sync>;

/// Completion client that records every call.
pub struct MockClient {
    respond: Responder,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, ChatRequest, ModelParams)>>,
}

impl MockClient {
    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Arc::new(Self::new(Box::new(move || Ok(text.clone()))))
    }

    pub fn failing(make: impl Fn() -> ProviderError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self::new(Box::new(move || Err(make()))))
    }

    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        let text = text.to_string();
        let mut client = Self::new(Box::new(move || Ok(text.clone())));
        client.delay = Some(delay);
        Arc::new(client)
    }

    fn new(respond: Responder) -> Self {
        Self {
            respond,
            delay: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Credential, request and params of the most recent call.
    pub fn last_call(&self) -> Option<(String, ChatRequest, ModelParams)> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    fn id(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: ChatRequest,
        params: &ModelParams,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some((credential.expose().to_string(), request, params.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)()
    }
}

pub fn params() -> ModelParams {
    ModelParams::new("gpt-3.5-turbo", 0.7, 100)
}
