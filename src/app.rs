//! Wiring of the store, the completion client and the core services.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use warmer_config::{Config, ConfigLoader};
use warmer_core::{Generator, MessageRelay, SettingsService, StyleAnalyzer};
use warmer_protocols::{CompletionClient, ModelParams, SettingsStore};
use warmer_provider_openai::OpenAIClient;
use warmer_settings_sqlite::SqliteSettingsStore;

/// Long-lived collaborators shared by every command.
pub(crate) struct App {
    config: Config,
    store: Arc<dyn SettingsStore>,
    client: Arc<dyn CompletionClient>,
}

impl App {
    pub(crate) async fn open(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db_path = ConfigLoader::expand_path(&config.storage.path);
        let store = SqliteSettingsStore::open(&db_path).await?;
        debug!(path = %db_path.display(), "Settings store ready");

        let client = OpenAIClient::with_url(config.provider.endpoint.clone())
            .with_timeout(Duration::from_secs(config.provider.request_timeout_seconds));

        Ok(Self::with_parts(config, Arc::new(store), Arc::new(client)))
    }

    pub(crate) fn with_parts(
        config: Config,
        store: Arc<dyn SettingsStore>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            store,
            client,
        }
    }

    fn reply_params(&self) -> ModelParams {
        ModelParams::new(
            self.config.provider.model.clone(),
            self.config.generation.temperature,
            self.config.generation.max_tokens,
        )
    }

    pub(crate) fn generator(&self) -> Arc<Generator> {
        Arc::new(Generator::new(
            self.store.clone(),
            self.client.clone(),
            self.reply_params(),
        ))
    }

    pub(crate) fn analyzer(&self) -> StyleAnalyzer {
        StyleAnalyzer::new(
            self.store.clone(),
            self.client.clone(),
            self.reply_params()
                .with_max_tokens(self.config.generation.analysis_max_tokens),
        )
    }

    pub(crate) fn settings(&self) -> SettingsService {
        SettingsService::new(self.store.clone())
    }

    pub(crate) fn relay(&self) -> MessageRelay {
        MessageRelay::new(Duration::from_secs(self.config.relay.reply_timeout_seconds))
    }
}
