//! Settings storage trait and file implementation

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Result, SettingsError};
use crate::structs::Settings;

/// Settings persistence backend.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Load the settings document.
    async fn load(&self) -> Result<Settings>;

    /// Persist the settings document.
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// JSON file in the application data directory.
#[derive(Clone)]
pub struct FileSettingsStorage {
    path: PathBuf,
}

impl FileSettingsStorage {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join("settings.json"),
        }
    }
}

#[async_trait]
impl SettingsStorage for FileSettingsStorage {
    async fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Err(SettingsError::NotFound);
        }

        let contents = fs::read_to_string(&self.path).await?;
        let settings: Settings = serde_json::from_str(&contents)?;

        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, contents).await?;

        Ok(())
    }
}
