//! Completion-service and hosted-auth clients for SageBot.
//!
//! All completion clients implement `sagebot_core::CompletionService`;
//! [`build_from_config`] picks one from configuration.

pub mod auth;
pub mod gemini;
pub mod relay;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use sagebot_config::AppConfig;
use sagebot_core::error::CompletionError;
use sagebot_core::provider::CompletionService;

pub use auth::HostedAuthClient;
pub use gemini::GeminiProvider;
pub use relay::RelayProvider;

/// Build the completion service from configuration.
///
/// A configured `relay_url` wins: the relay holds its own credential, and
/// the auth public key (if any) is sent as its bearer. Otherwise the
/// service calls Gemini directly and needs `api_key`.
pub fn build_from_config(
    config: &AppConfig,
    api_key: Option<String>,
) -> Result<Arc<dyn CompletionService>, CompletionError> {
    if let Some(url) = &config.completion.relay_url {
        let mut relay = RelayProvider::new(url);
        if let Some(key) = &config.auth.anon_key {
            relay = relay.with_bearer(key);
        }
        tracing::debug!(url = %url, "Using relay completion service");
        return Ok(Arc::new(relay));
    }

    let key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
        CompletionError::NotConfigured(
            "no API key found; run `sagebot key set` or set SAGEBOT_API_KEY".into(),
        )
    })?;

    Ok(Arc::new(
        GeminiProvider::new(key)
            .with_base_url(&config.completion.api_url)
            .with_model(&config.completion.model),
    ))
}
