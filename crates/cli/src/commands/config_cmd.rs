//! `sagebot config` — Configuration management commands.

use sagebot_config::{AppConfig, CredentialStore};

pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run `sagebot config init`.");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Run: sagebot key set");
    println!("   2. Run: sagebot chat");
    Ok(())
}

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            let has_key = config
                .resolve_api_key(&CredentialStore::at_default_location())
                .is_some();
            if !has_key && config.completion.relay_url.is_none() {
                warnings.push("No API key or relay configured (run `sagebot key set`)");
            }

            if config.auth.url.is_some() != config.auth.anon_key.is_some() {
                warnings.push("auth.url and auth.anon_key must be set together");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Persona:   {}", config.persona());
            println!("   Model:     {}", config.completion.model);
            println!(
                "   Relay:     {}:{}",
                config.gateway.host, config.gateway.port
            );
            println!(
                "   Auth:      {}",
                config.auth.url.as_deref().unwrap_or("not configured")
            );
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", toml::to_string_pretty(&redacted(config))?);
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

/// Blank out secrets before printing.
fn redacted(mut config: AppConfig) -> AppConfig {
    let hide = |s: &mut Option<String>| {
        if s.is_some() {
            *s = Some("[REDACTED]".into());
        }
    };
    hide(&mut config.completion.api_key);
    hide(&mut config.auth.anon_key);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn shown_config_hides_secrets() {
        let mut config = AppConfig::default();
        config.completion.api_key = Some("AIza-secret".into());
        config.auth.anon_key = Some("anon-secret".into());

        let shown = toml::to_string_pretty(&redacted(config)).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("[REDACTED]"));
    }
}
