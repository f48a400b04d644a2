//! `sagebot relay` — Start the HTTP relay.

use sagebot_config::{AppConfig, CredentialStore};

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    // The relay always calls the API itself, even if this config points
    // the CLI at another relay.
    config.completion.relay_url = None;
    let api_key = config.resolve_api_key(&CredentialStore::at_default_location());
    let service = sagebot_providers::build_from_config(&config, api_key)?;

    println!("🌿 SageBot Relay");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.completion.model);
    println!("   Origins:   {}", config.gateway.allowed_origins.join(", "));

    sagebot_gateway::start(config, service).await?;

    Ok(())
}
