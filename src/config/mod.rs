//! User preferences and per-request configuration.
//!
//! [`Settings`] is what gets persisted between runs (API key override, theme,
//! default tier, model names). Before each request it is resolved into a
//! [`RequestConfig`], so nothing downstream reads preferences on its own.

pub mod persistence;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Environment variable holding the process-wide default API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_FAST_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ACCURATE_MODEL: &str = "gpt-4o";

/// Analysis mode: which model quality to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Fast,
    Accurate,
}

impl Tier {
    pub fn toggle(self) -> Self {
        match self {
            Tier::Fast => Tier::Accurate,
            Tier::Accurate => Tier::Fast,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Fast => "Fast",
            Tier::Accurate => "Accurate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persisted preferences. Every field has a default so older or partial
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// User-supplied key; takes precedence over `OPENAI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OpenAI-compatible endpoint; the client's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub default_tier: Tier,
    pub theme: Theme,
    pub fast_model: String,
    pub accurate_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            default_tier: Tier::default(),
            theme: Theme::default(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            accurate_model: DEFAULT_ACCURATE_MODEL.to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Stored override, ignoring blank values.
    pub fn api_key_override(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Resolve against the process environment.
    pub fn request_config(&self) -> Result<RequestConfig, ValidationError> {
        RequestConfig::resolve(self, env_api_key())
    }
}

/// Where the fallback API key comes from when settings carry none.
pub type KeySource = fn() -> Option<String>;

/// Reads `OPENAI_API_KEY`.
pub fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

/// Everything a single request needs, read once from [`Settings`].
#[derive(Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub api_key: String,
    pub api_base: Option<String>,
    pub fast_model: String,
    pub accurate_model: String,
}

impl RequestConfig {
    /// The settings override wins over `env_key`; both blank means
    /// [`ValidationError::MissingApiKey`].
    pub fn resolve(settings: &Settings, env_key: Option<String>) -> Result<Self, ValidationError> {
        let api_key = settings
            .api_key_override()
            .map(str::to_string)
            .or_else(|| {
                env_key
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty())
            })
            .ok_or(ValidationError::MissingApiKey)?;

        Ok(Self {
            api_key,
            api_base: settings.api_base.clone(),
            fast_model: settings.fast_model.clone(),
            accurate_model: settings.accurate_model.clone(),
        })
    }

    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Fast => &self.fast_model,
            Tier::Accurate => &self.accurate_model,
        }
    }
}

// Keep the key out of logs
impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("fast_model", &self.fast_model)
            .field("accurate_model", &self.accurate_model)
            .finish()
    }
}
