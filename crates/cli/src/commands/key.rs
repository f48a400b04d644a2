//! `sagebot key` — Manage the locally saved API key.

use sagebot_config::{AppConfig, CredentialStore};

pub async fn set(key: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let key = super::secret_or_prompt(key, || super::read_secret("API key"))?;

    let store = CredentialStore::at_default_location();
    store.save(&key)?;
    println!("✅ API key saved to {}", store.path().display());
    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = CredentialStore::at_default_location();

    if let Some(relay) = &config.completion.relay_url {
        println!("   Relay:   {relay} (the relay holds the key)");
    }

    match (&config.completion.api_key, store.load()?) {
        (Some(key), _) => println!("   Key:     {} (config file / environment)", mask(key)),
        (None, Some(key)) => println!("   Key:     {} ({})", mask(&key), store.path().display()),
        (None, None) => println!("   Key:     not set — run `sagebot key set`"),
    }
    Ok(())
}

pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let store = CredentialStore::at_default_location();
    if store.clear()? {
        println!("✅ Saved API key removed");
    } else {
        println!("   No saved API key");
    }
    Ok(())
}

/// Keep only the first and last four characters visible.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_keys_keep_ends() {
        assert_eq!(mask("AIzaSyD-1234567890-wxyz"), "AIza…wxyz");
    }

    #[test]
    fn short_keys_are_fully_hidden() {
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("12345678"), "********");
    }
}
