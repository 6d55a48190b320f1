use super::Result;
use std::env;

#[cfg(not(test))]
use crate::error::StorageError;
#[cfg(not(test))]
use keyring::Entry;

const KEYRING_SERVICE: &str = "manifold-cli";
const SESSION_KEY: &str = "session";
pub const API_TOKEN_ENV: &str = "MANIFOLD_API_TOKEN";

/// Persisted session token for the current machine user.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    session_token: Option<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the session token; `MANIFOLD_API_TOKEN` takes priority over the keyring.
    pub fn load() -> Result<Self> {
        if let Some(token) = token_from_env() {
            return Ok(Self {
                session_token: Some(token),
            });
        }

        Ok(Self {
            session_token: load_entry(SESSION_KEY)?,
        })
    }

    pub fn save_session(token: &str) -> Result<()> {
        save_entry(SESSION_KEY, token)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn with_session_token(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
        }
    }
}

fn token_from_env() -> Option<String> {
    env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty())
}

#[cfg(not(test))]
fn entry(key: &str) -> Result<Entry> {
    Entry::new(KEYRING_SERVICE, key).map_err(|e| StorageError::KeyringError(e.to_string()))
}

#[cfg(not(test))]
fn load_entry(key: &str) -> Result<Option<String>> {
    match entry(key)?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(StorageError::KeyringError(e.to_string())),
    }
}

#[cfg(not(test))]
fn save_entry(key: &str, value: &str) -> Result<()> {
    entry(key)?
        .set_password(value)
        .map_err(|e| StorageError::KeyringError(e.to_string()))
}


#[cfg(test)]
fn load_entry(key: &str) -> Result<Option<String>> {
    let entries = mock_store::ENTRIES.lock().unwrap_or_else(|e| e.into_inner());
    Ok(entries
        .as_ref()
        .and_then(|map| map.get(&format!("{}/{}", KEYRING_SERVICE, key)).cloned()))
}

#[cfg(test)]
fn save_entry(key: &str, value: &str) -> Result<()> {
    let mut entries = mock_store::ENTRIES.lock().unwrap_or_else(|e| e.into_inner());
    entries
        .get_or_insert_with(Default::default)
        .insert(format!("{}/{}", KEYRING_SERVICE, key), value.to_string());
    Ok(())
}
