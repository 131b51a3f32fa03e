//! Settings manager service

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{Result, SettingsError};
use crate::storage::SettingsStorage;
use crate::structs::{Settings, DEFAULT_LLM_BASE_URL};

/// Caches the current settings and writes through to storage on update.
pub struct SettingsManager<S: SettingsStorage> {
    storage: Arc<S>,
    current: Arc<RwLock<Settings>>,
}

impl<S: SettingsStorage> SettingsManager<S> {
    /// Load settings, falling back to (and persisting) the defaults when
    /// the backend has none yet.
    pub async fn new(storage: S) -> Result<Self> {
        let storage = Arc::new(storage);

        let settings = match storage.load().await {
            Ok(settings) => settings,
            Err(SettingsError::NotFound) => {
                let defaults = Settings::default();
                storage.save(&defaults).await?;
                defaults
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            current: Arc::new(RwLock::new(settings)),
        })
    }

    /// Current settings snapshot.
    pub async fn get(&self) -> Settings {
        self.current.read().await.clone()
    }

    /// Replace the settings and persist them.
    ///
    /// A blank endpoint URL resets to the default and the system prompt
    /// is stored trimmed, mirroring the front-end's save behavior.
    pub async fn update(&self, mut settings: Settings) -> Result<Settings> {
        let url = settings.llm_base_url.trim();
        settings.llm_base_url = if url.is_empty() {
            tracing::info!("LLM base URL reset to default");
            DEFAULT_LLM_BASE_URL.to_string()
        } else {
            url.to_string()
        };
        settings.system_prompt = settings.system_prompt.trim().to_string();
        settings.updated_at = chrono::Utc::now();

        self.storage.save(&settings).await?;
        *self.current.write().await = settings.clone();

        tracing::info!(endpoint = %settings.llm_base_url, "settings updated");
        Ok(settings)
    }
}
