//! Configuration loading, validation, and management for SageBot.
//!
//! Loads configuration from `~/.sagebot/config.toml` with environment
//! variable overrides. Validates all settings at startup. Credentials are
//! always injected here, never compiled in.

mod store;

pub use store::{CredentialStore, SessionStore};

use sagebot_core::persona::PersonaId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.sagebot/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persona used when none is requested
    #[serde(default = "default_persona")]
    pub default_persona: String,

    /// Completion service settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Relay (HTTP gateway) settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Hosted auth service settings
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_persona() -> String {
    PersonaId::Health.to_string()
}
fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_model() -> String {
    "gemini-pro".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of the completion API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model name used in the `generateContent` path
    #[serde(default = "default_model")]
    pub model: String,

    /// Completion-service credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Send messages through a SageBot relay instead of calling the API
    /// directly (e.g. `http://127.0.0.1:8787/chat`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            api_key: None,
            relay_url: None,
        }
    }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("relay_url", &self.relay_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// CORS origins; `"*"` allows any origin
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_origins() -> Vec<String> {
    vec!["*".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: default_origins(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the hosted auth project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public (anon) API key sent with every auth request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("anon_key", &redact(&self.anon_key))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.sagebot/config.toml).
    ///
    /// Environment overrides:
    /// - `SAGEBOT_API_KEY`, `GEMINI_API_KEY`, `GOOGLE_API_KEY` (credential,
    ///   only when the file sets none)
    /// - `SAGEBOT_PERSONA`, `SAGEBOT_MODEL`
    /// - `SAGEBOT_AUTH_URL`, `SAGEBOT_AUTH_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.completion.api_key.is_none() {
            self.completion.api_key = var("SAGEBOT_API_KEY")
                .or_else(|| var("GEMINI_API_KEY"))
                .or_else(|| var("GOOGLE_API_KEY"));
        }
        if let Some(persona) = var("SAGEBOT_PERSONA") {
            self.default_persona = persona;
        }
        if let Some(model) = var("SAGEBOT_MODEL") {
            self.completion.model = model;
        }
        if let Some(url) = var("SAGEBOT_AUTH_URL") {
            self.auth.url = Some(url);
        }
        if let Some(key) = var("SAGEBOT_AUTH_KEY") {
            self.auth.anon_key = Some(key);
        }
    }

    /// The completion credential: config file or environment first, then
    /// the locally saved credential.
    pub fn resolve_api_key(&self, store: &CredentialStore) -> Option<String> {
        if let Some(key) = &self.completion.api_key {
            return Some(key.clone());
        }
        match store.load() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved credential");
                None
            }
        }
    }

    /// The configured default persona.
    pub fn persona(&self) -> PersonaId {
        self.default_persona.parse().unwrap_or(PersonaId::Health)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".sagebot")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.default_persona.parse::<PersonaId>() {
            return Err(ConfigError::ValidationError(format!("default_persona: {e}")));
        }

        if self.completion.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "completion.model must not be empty".into(),
            ));
        }

        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be non-zero".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_persona: default_persona(),
            completion: CompletionConfig::default(),
            gateway: GatewayConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
