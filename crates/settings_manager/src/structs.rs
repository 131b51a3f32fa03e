//! Settings data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default completion endpoint, matching the relay gateway fallback.
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:9090/v1";

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Persisted user settings.
///
/// Every field has a default so a missing or partial settings file
/// always loads. Field names match the front-end's storage keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the completion endpoint.
    #[serde(default = "default_llm_base_url")]
    pub llm_base_url: String,

    /// Prepended as a system message when non-empty.
    #[serde(default)]
    pub system_prompt: String,

    #[serde(default)]
    pub theme: Theme,

    /// Last time the settings were saved.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_llm_base_url() -> String {
    DEFAULT_LLM_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_base_url: default_llm_base_url(),
            system_prompt: String::new(),
            theme: Theme::default(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_loads_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "theme": "dark" }"#).unwrap();
        assert_eq!(settings.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(settings.system_prompt, "");
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn keys_are_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("llmBaseUrl").is_some());
        assert!(value.get("systemPrompt").is_some());
        assert_eq!(value["theme"], "light");
    }
}
