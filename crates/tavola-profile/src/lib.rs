//! Tavola profile storage - per-profile identity and preferences.
//!
//! The equivalent of browser local storage: a small string key-value map
//! persisted to one JSON file, scoped to a single profile directory.
//! It holds the anonymous identity that scopes likes and the last author
//! name used for comments.
//!
//! # Identity
//!
//! The identity is an opaque token, `"user_"` plus a random alphanumeric
//! suffix, generated lazily on first use and stable for the life of the
//! profile. It is not an account and carries no personal information.
//! Collisions are not checked; the suffix makes them overwhelmingly
//! unlikely within a deployment's expected population.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur reading or writing the profile.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

const IDENTITY_KEY: &str = "identity";
const LAST_AUTHOR_KEY: &str = "last_author";

/// Length of the random suffix in generated identities.
const IDENTITY_SUFFIX_LEN: usize = 12;

/// A profile-scoped preference store, persisted as a JSON file.
///
/// Reads are served from memory; every `set` writes through to disk.
pub struct Prefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Prefs {
    /// Load preferences from `path`, starting empty if the file is absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value and persist the whole map to disk.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.into(), value.into());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Return the persisted identity, generating and persisting one on
    /// first use. Stable across calls and across reopens of the profile.
    pub fn get_or_create_identity(&mut self) -> Result<String> {
        if let Some(identity) = self.get(IDENTITY_KEY) {
            return Ok(identity.to_string());
        }

        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(IDENTITY_SUFFIX_LEN)
            .map(char::from)
            .collect();
        let identity = format!("user_{}", suffix);

        tracing::debug!(identity = %identity, "generated new profile identity");
        self.set(IDENTITY_KEY, identity.clone())?;
        Ok(identity)
    }

    /// The author name last used for a comment, if any.
    pub fn last_author(&self) -> Option<&str> {
        self.get(LAST_AUTHOR_KEY)
    }

    /// Remember the author name to prefill future comment forms.
    pub fn set_last_author(&mut self, name: &str) -> Result<()> {
        self.set(LAST_AUTHOR_KEY, name)
    }
}
