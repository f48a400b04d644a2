//! `sagebot chat` — Interactive or single-message chat with a persona.

use std::io::Write;

use sagebot_config::{AppConfig, CredentialStore};
use sagebot_core::error::CompletionError;
use sagebot_core::message::Message;
use sagebot_core::persona::{self, Persona, PersonaId};
use sagebot_core::provider::CompletionService;
use sagebot_core::sections::{Block, parse_sections, render_section};
use sagebot_core::session::{ChatSession, Submission};
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(
    persona: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let persona_id = match persona {
        Some(id) => id.parse::<PersonaId>()?,
        None => config.persona(),
    };

    let api_key = config.resolve_api_key(&CredentialStore::at_default_location());
    let service = match sagebot_providers::build_from_config(&config, api_key) {
        Ok(service) => service,
        Err(e @ CompletionError::NotConfigured(_)) => {
            print_setup_help();
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let mut session = ChatSession::new(persona::get(persona_id));

    if let Some(msg) = message {
        // Single message mode
        let reply = exchange(&mut session, &msg, service.as_ref()).await?;
        println!("{}", format_reply(session.persona(), &reply.content));
        return Ok(());
    }

    print_banner(&session, service.name());

    let mut lines = BufReader::new(io::stdin()).lines();
    prompt_user()?;

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Empty => {}
            Input::Exit => break,
            Input::Help => print_help(),
            Input::Persona(id) => match id.parse::<PersonaId>() {
                Ok(id) => {
                    session = ChatSession::new(persona::get(id));
                    print_banner(&session, service.name());
                }
                Err(e) => eprintln!("  [Error] {e}"),
            },
            Input::Search(query) => print_matches(&session, &query),
            Input::Message(text) => match exchange(&mut session, &text, service.as_ref()).await {
                Ok(reply) => {
                    println!();
                    print_assistant(&format_reply(session.persona(), &reply.content));
                    println!();
                }
                Err(e) => eprintln!("  [Error] {e}"),
            },
        }
        prompt_user()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

/// Submit one message and wait for its reply, showing a busy marker
/// while the completion call is in flight.
async fn exchange(
    session: &mut ChatSession,
    text: &str,
    service: &dyn CompletionService,
) -> Result<Message, Box<dyn std::error::Error>> {
    match session.submit(text)? {
        Submission::Rejected(rejection) => Ok(rejection),
        Submission::Pending(pending) => {
            if session.is_busy() {
                eprint!("  ...");
            }
            let result = service.complete(pending.request()).await;
            eprint!("\r     \r");
            Ok(session.resolve(pending, result))
        }
    }
}

/// A line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Exit,
    Help,
    Persona(String),
    Search(String),
    Message(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
        return Input::Exit;
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    match head {
        "/help" => Input::Help,
        "/persona" => Input::Persona(rest.to_string()),
        "/search" => Input::Search(rest.to_string()),
        _ => Input::Message(line.to_string()),
    }
}

/// Lay out a reply: numbered replies as titled sections, anything else
/// (greetings, rejections, error notices) verbatim.
fn format_reply(persona: &Persona, content: &str) -> String {
    let sections = parse_sections(content, persona);
    if !sections.is_structured() {
        return content.trim().to_string();
    }

    let mut out = Vec::new();
    for (field, body) in sections.fields() {
        if body.is_empty() {
            continue;
        }
        out.push(format!("{}:", field.title));
        match render_section(body) {
            Block::Paragraph(text) => out.push(format!("  {text}")),
            Block::List(items) => out.extend(items.iter().map(|item| format!("  • {item}"))),
        }
        out.push(String::new());
    }
    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out.join("\n")
}

fn print_banner(session: &ChatSession, provider: &str) {
    let persona = session.persona();
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║  {:<44}║", persona.name);
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Service:   {provider}");
    println!();
    if let Some(greeting) = session.transcript().last() {
        print_assistant(&greeting.content);
    }
    println!();
    println!("  Try asking:");
    for suggestion in persona.suggestions {
        println!("    - {suggestion}");
    }
    println!();
    println!("  Type /help for commands, 'exit' or Ctrl+C to quit.");
    println!();
}

fn print_help() {
    println!();
    println!("  /persona <id>   switch to health, study, business or scripts");
    println!("  /search <text>  find earlier messages containing <text>");
    println!("  exit            leave the chat");
    println!();
}

fn print_matches(session: &ChatSession, query: &str) {
    let matches = session.transcript().search(query);
    println!();
    if matches.is_empty() {
        println!("  No messages found.");
    }
    for message in matches {
        let who = if message.is_user() { "You" } else { "Assistant" };
        let first_line = message.content.lines().next().unwrap_or_default();
        println!(
            "  [{}] {who}: {first_line}",
            message.timestamp.format("%H:%M")
        );
    }
    println!();
}

fn print_assistant(text: &str) {
    for line in text.lines() {
        println!("  Assistant > {line}");
    }
}

fn prompt_user() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

fn print_setup_help() {
    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Save one locally:");
    eprintln!("    sagebot key set");
    eprintln!();
    eprintln!("  Or set one of these environment variables:");
    eprintln!("    SAGEBOT_API_KEY, GEMINI_API_KEY, GOOGLE_API_KEY");
    eprintln!();
    eprintln!("  Or point the CLI at a relay in your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!("    [completion]");
    eprintln!("    relay_url = \"http://127.0.0.1:8787/chat\"");
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_commands() {
        assert_eq!(parse_input("   "), Input::Empty);
        assert_eq!(parse_input("quit"), Input::Exit);
        assert_eq!(parse_input("/help"), Input::Help);
        assert_eq!(parse_input("/persona study"), Input::Persona("study".into()));
        assert_eq!(parse_input("/search  fever "), Input::Search("fever".into()));
        assert_eq!(
            parse_input("  I have a cough "),
            Input::Message("I have a cough".into())
        );
    }

    #[test]
    fn commands_match_whole_words_only() {
        assert_eq!(
            parse_input("/personal trainer says my knee pain is bad"),
            Input::Message("/personal trainer says my knee pain is bad".into())
        );
        assert_eq!(
            parse_input("/searching for a cure"),
            Input::Message("/searching for a cure".into())
        );
        assert_eq!(parse_input("/persona"), Input::Persona(String::new()));
        assert_eq!(parse_input("/search\tfever"), Input::Search("fever".into()));
    }

    #[test]
    fn numbered_reply_renders_titled_sections() {
        let health = persona::get(PersonaId::Health);
        let out = format_reply(
            health,
            "1. Possible viral infection\n2. * Rest\n* Drink fluids\n3. If fever exceeds 103°F\n4. Not a diagnosis",
        );

        let titles: Vec<&str> = health.layout.fields.iter().map(|f| f.title).collect();
        for title in titles {
            assert!(out.contains(&format!("{title}:")), "missing {title} in {out}");
        }
        assert!(out.contains("  • Rest"));
        assert!(out.contains("  • Drink fluids"));
        assert!(out.contains("  If fever exceeds 103°F"));
    }

    #[test]
    fn plain_reply_is_verbatim() {
        let health = persona::get(PersonaId::Health);
        assert_eq!(format_reply(health, "  Just rest.  "), "Just rest.");
        assert_eq!(format_reply(health, health.rejection), health.rejection.trim());
    }
}
