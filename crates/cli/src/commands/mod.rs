pub mod auth;
pub mod chat;
pub mod config_cmd;
pub mod key;
pub mod personas;
pub mod relay;

use dialoguer::Password;

/// Use `given` if present, otherwise ask with `prompt`.
pub(crate) fn secret_or_prompt<F>(
    given: Option<String>,
    prompt: F,
) -> Result<String, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<String, dialoguer::Error>,
{
    match given {
        Some(secret) => Ok(secret),
        None => Ok(prompt()?),
    }
}

/// Read a secret from the terminal without echoing it.
pub(crate) fn read_secret(label: &str) -> Result<String, dialoguer::Error> {
    Password::new().with_prompt(label).interact()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_secret_skips_the_prompt() {
        let secret = secret_or_prompt(Some("pw".into()), || {
            panic!("prompt must not run when a value is given")
        })
        .unwrap();
        assert_eq!(secret, "pw");
    }

    #[test]
    fn missing_secret_is_prompted_for() {
        let secret = secret_or_prompt(None, || Ok("typed-key".to_string())).unwrap();
        assert_eq!(secret, "typed-key");
    }

    #[test]
    fn prompt_failure_is_propagated() {
        let err = secret_or_prompt(None, || {
            Err(dialoguer::Error::IO(std::io::Error::other("not a terminal")))
        })
        .unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
    }
}
