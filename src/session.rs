//! Credential context for authenticated calls.
//!
//! [`TokenProvider`] is the seam the [`Bearer`](crate::fetch::auth::Bearer)
//! decorator reads the access token through. [`SessionStore`] persists the
//! token obtained at login in a small JSON file, keyed `token`:
//!
//! ```json
//! { "token": "eyJhbGciOi..." }
//! ```
//!
//! There is no expiry or refresh handling; a missing token is an ordinary
//! "please log in" state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;

const TOKEN_KEY: &str = "token";

/// Supplies the bearer token for authenticated requests, if one exists.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<String>;
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. An absent, unreadable or malformed session
    /// file all mean "not logged in".
    pub fn load(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => {
                debug!(path = %self.path.display(), "No session file");
                return None;
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(mut entries) => entries.remove(TOKEN_KEY).filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                None
            }
        }
    }

    /// Persists `token`, replacing any previous session.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let entries = HashMap::from([(TOKEN_KEY, token)]);
        let body = serde_json::to_string_pretty(&entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Removes the session file. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl TokenProvider for SessionStore {
    async fn token(&self) -> Option<String> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_save_then_load() {
        let store = SessionStore::new(temp_path("vax_console_session_roundtrip.json"));
        let _ = store.clear();

        store.save("tok-1").unwrap();
        assert_eq!(store.load().as_deref(), Some("tok-1"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_missing_file_is_logged_out() {
        let store = SessionStore::new(temp_path("vax_console_session_missing.json"));
        let _ = fs::remove_file(store.path());
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_is_logged_out() {
        let path = temp_path("vax_console_session_malformed.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(&path);
        assert_eq!(store.load(), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_token_is_logged_out() {
        let path = temp_path("vax_console_session_empty.json");
        fs::write(&path, r#"{"token": ""}"#).unwrap();

        assert_eq!(SessionStore::new(&path).load(), None);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_static_token_provider() {
        assert_eq!(StaticToken::new("x").token().await.as_deref(), Some("x"));
        assert_eq!(StaticToken::none().token().await, None);
    }
}
