use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use easy_config_store::ConfigStore;
use eyre::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::export::print::{DEFAULT_MAX_ATTEMPTS, ReadinessPolicy};
use crate::models::design::{AccentColor, DesignChoice, TemplateName};
use crate::store::persistence::DEFAULT_STORAGE_KEY;

pub type Config = Arc<ConfigInner>;

pub fn config(path: PathBuf) -> Result<Config> {
    let config_store = ConfigStore::<ConfigInner>::read(path, "config".to_string())?;
    let inner = (*config_store).clone();

    info!("config parsing successful");
    debug!("loaded configuration:\n{}", toml::to_string_pretty(&inner.redacted())?);

    Ok(Arc::new(inner))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct ConfigInner {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl ConfigInner {
    fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.llm.api_key.is_some() {
            copy.llm.api_key = Some("<redacted>".to_string());
        }
        copy
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
}

impl LLMConfig {
    /// The configured key, else `GEMINI_API_KEY`, else `API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DesignConfig {
    #[serde(default = "default_template")]
    pub template: TemplateName,
    #[serde(default)]
    pub accent: AccentColor,
}

impl DesignConfig {
    pub fn choice(&self) -> DesignChoice {
        DesignChoice {
            template: self.template,
            accent: self.accent.clone(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_print_command")]
    pub print_command: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Must be at least 1; zero is rejected when the config is read.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: NonZeroUsize,
}

impl ExportConfig {
    pub fn readiness_policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts,
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".resume-studio")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_template() -> TemplateName {
    TemplateName::Modern
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_print_command() -> String {
    "chromium --headless --no-pdf-header-footer --print-to-pdf={output} {input}".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_poll_attempts() -> NonZeroUsize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_llm_model(),
            endpoint: default_llm_endpoint(),
        }
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            accent: AccentColor::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            print_command: default_print_command(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}
