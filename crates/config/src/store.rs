//! Local persistence: the saved completion credential and the signed-in
//! auth session, each a single file under the config directory.

use std::path::{Path, PathBuf};

use sagebot_core::auth::AuthSession;

use crate::{AppConfig, ConfigError};

fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Write `content` readable by the owner only.
fn write_private(path: &Path, content: &str) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(write_err)?;
    }

    Ok(())
}

fn remove_if_present(path: &Path) -> Result<bool, ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ConfigError::WriteError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// The manually saved completion-service credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.sagebot/credential`
    pub fn at_default_location() -> Self {
        Self::new(AppConfig::config_dir().join("credential"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved credential, or `None` if nothing (or only whitespace) is saved.
    pub fn load(&self) -> Result<Option<String>, ConfigError> {
        Ok(read_optional(&self.path)?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn save(&self, key: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::ValidationError("credential must not be empty".into()));
        }
        write_private(&self.path, key)?;
        tracing::info!(path = %self.path.display(), "Credential saved");
        Ok(())
    }

    /// Remove the saved credential. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, ConfigError> {
        remove_if_present(&self.path)
    }
}

/// The signed-in auth session, stored as JSON.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.sagebot/session.json`
    pub fn at_default_location() -> Self {
        Self::new(AppConfig::config_dir().join("session.json"))
    }

    pub fn load(&self) -> Result<Option<AuthSession>, ConfigError> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(session).map_err(|e| ConfigError::WriteError {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        write_private(&self.path, &json)
    }

    pub fn clear(&self) -> Result<bool, ConfigError> {
        remove_if_present(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sagebot_core::auth::AuthUser;

    #[test]
    fn credential_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("credential"));

        assert_eq!(store.load().unwrap(), None);

        store.save("  AIza-test-key\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("AIza-test-key"));

        assert!(store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn empty_credential_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credential"));
        assert!(store.save("   ").is_err());
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credential"));
        store.save("secret").unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn session_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());

        let session = AuthSession {
            access_token: "tok".into(),
            refresh_token: Some("ref".into()),
            expires_at: Some(chrono::Utc::now()),
            user: AuthUser {
                id: "42".into(),
                email: "ravi@example.com".into(),
                display_name: Some("Ravi".into()),
            },
        };
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.user, session.user);
        assert_eq!(loaded.access_token, "tok");

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_session_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SessionStore::new(path).load(),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
