//! SageBot CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive or single-message chat with a persona
//! - `relay`    — Start the HTTP relay that holds the API key
//! - `key`      — Save, show or clear the local API key
//! - `auth`     — Sign in, sign up, sign out, reset password
//! - `config`   — Create, show, locate and validate the config file
//! - `personas` — List the available assistants

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sagebot",
    about = "SageBot — topic-focused AI assistants in your terminal",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with an assistant
    Chat {
        /// Persona to talk to (health, study, business, scripts)
        #[arg(short, long)]
        persona: Option<String>,

        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Start the HTTP relay
    Relay {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage the locally saved API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Account commands against the hosted auth service
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the available assistants
    Personas,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Save an API key (prompts if omitted)
    Set { key: Option<String> },
    /// Show where the active key comes from, masked
    Show,
    /// Remove the saved key
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Signin {
        email: String,
        /// Prompted for without echo if omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        email: String,
        /// Display name stored on the profile
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the saved session
    Signout,
    /// Email a password-recovery link
    Reset { email: String },
    /// Show the signed-in account
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Check the configuration for errors
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat { persona, message } => commands::chat::run(persona, message).await?,
        Commands::Relay { port } => commands::relay::run(port).await?,
        Commands::Key { action } => match action {
            KeyAction::Set { key } => commands::key::set(key).await?,
            KeyAction::Show => commands::key::show().await?,
            KeyAction::Clear => commands::key::clear().await?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Signin { email, password } => {
                commands::auth::sign_in(email, password).await?
            }
            AuthAction::Signup {
                email,
                name,
                password,
            } => commands::auth::sign_up(email, name, password).await?,
            AuthAction::Signout => commands::auth::sign_out().await?,
            AuthAction::Reset { email } => commands::auth::reset(email).await?,
            AuthAction::Status => commands::auth::status().await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config_cmd::init().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
        Commands::Personas => commands::personas::run().await?,
    }

    Ok(())
}
