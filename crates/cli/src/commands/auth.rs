//! `sagebot auth` — Account commands against the hosted auth service.

use sagebot_config::{AppConfig, SessionStore};
use sagebot_core::auth::{AuthEvent, AuthService, SignUpOutcome, require_fields};
use sagebot_providers::HostedAuthClient;
use tracing::warn;

fn client() -> Result<HostedAuthClient, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(HostedAuthClient::from_config(&config)?)
}

fn password_or_prompt(password: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    super::secret_or_prompt(password, || super::read_secret("Password"))
}

pub async fn sign_in(
    email: String,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = password_or_prompt(password)?;
    require_fields(&[("Email", email.as_str()), ("Password", password.as_str())])?;

    let client = client()?;
    let mut events = client.subscribe();
    let session = client.sign_in(email.trim(), &password).await?;
    SessionStore::at_default_location().save(&session)?;

    if let Ok(AuthEvent::SignedIn(user)) = events.try_recv() {
        let name = user.display_name.as_deref().unwrap_or(&user.email);
        println!("✅ Welcome back, {name}!");
    }
    Ok(())
}

pub async fn sign_up(
    email: String,
    name: String,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = password_or_prompt(password)?;
    require_fields(&[
        ("Full name", name.as_str()),
        ("Email", email.as_str()),
        ("Password", password.as_str()),
    ])?;

    let client = client()?;
    match client.sign_up(email.trim(), &password, name.trim()).await? {
        SignUpOutcome::SignedIn(session) => {
            SessionStore::at_default_location().save(&session)?;
            println!("✅ Account created. You are signed in as {}.", session.user.email);
        }
        SignUpOutcome::ConfirmationSent(user) => {
            println!("✅ Account created. Check {} to confirm your email.", user.email);
        }
    }
    Ok(())
}

pub async fn sign_out() -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::at_default_location();
    let Some(session) = store.load()? else {
        println!("   Not signed in");
        return Ok(());
    };

    // An expired token cannot be revoked remotely; forget it locally anyway.
    if let Err(e) = client()?.sign_out(&session).await {
        warn!(error = %e, "Remote sign-out failed");
    }
    store.clear()?;
    println!("✅ Signed out");
    Ok(())
}

pub async fn reset(email: String) -> Result<(), Box<dyn std::error::Error>> {
    require_fields(&[("Email", email.as_str())])?;
    client()?.reset_password(email.trim()).await?;
    println!("✅ If an account exists for {}, a reset link is on its way.", email.trim());
    Ok(())
}

pub async fn status() -> Result<(), Box<dyn std::error::Error>> {
    match SessionStore::at_default_location().load()? {
        Some(session) => {
            let user = &session.user;
            println!("   Signed in: {}", user.email);
            if let Some(name) = &user.display_name {
                println!("   Name:      {name}");
            }
            if session.is_expired() {
                println!("   ⚠️  Session expired — run `sagebot auth signin`");
            }
        }
        None => println!("   Not signed in"),
    }
    Ok(())
}
