//! # Session Store
//!
//! Persists the cart and the signed-in user between invocations.
//!
//! ```text
//! <data dir>/
//! ├── cart.json      Cart (items, rewards balance, redemption toggle)
//! └── session.json   UserSession (who is signed in)
//! ```
//!
//! The data dir is the platform app-data folder unless overridden:
//! - **Linux**: `~/.local/share/storefront/`
//! - **macOS**: `~/Library/Application Support/pk.loopwear.storefront/`
//! - **Windows**: `%APPDATA%\loopwear\storefront\data\`
//!
//! Files are written to a sibling temp file and renamed into place, so an
//! interrupted write never leaves a truncated cart behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::cart::Cart;

pub const CART_FILE: &str = "cart.json";
pub const SESSION_FILE: &str = "session.json";

/// Persistence failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid session data in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The signed-in user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,

    /// Present for vendor accounts
    #[serde(default)]
    pub store_id: Option<String>,

    #[serde(default)]
    pub store_name: Option<String>,
}

/// JSON files in one directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SessionError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(SessionStore { dir })
    }

    /// Platform app-data directory for the storefront.
    pub fn default_dir() -> Result<PathBuf, SessionError> {
        let proj_dirs =
            ProjectDirs::from("pk", "loopwear", "storefront").ok_or(SessionError::NoDataDir)?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the saved cart, or an empty one on first run.
    pub fn load_cart(&self) -> Result<Cart, SessionError> {
        Ok(self.read_json(CART_FILE)?.unwrap_or_default())
    }

    pub fn save_cart(&self, cart: &Cart) -> Result<(), SessionError> {
        self.write_json(CART_FILE, cart)
    }

    pub fn clear_cart(&self) -> Result<(), SessionError> {
        self.remove(CART_FILE)
    }

    pub fn load_user(&self) -> Result<Option<UserSession>, SessionError> {
        self.read_json(SESSION_FILE)
    }

    pub fn save_user(&self, user: &UserSession) -> Result<(), SessionError> {
        self.write_json(SESSION_FILE, user)
    }

    pub fn clear_user(&self) -> Result<(), SessionError> {
        self.remove(SESSION_FILE)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SessionError> {
        let path = self.dir.join(name);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                warn!(path = %path.display(), error = %source, "session file is corrupt");
                Err(SessionError::Corrupt { path, source })
            }
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SessionError> {
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));

        let json = serde_json::to_vec_pretty(value).map_err(|source| SessionError::Corrupt {
            path: path.clone(),
            source,
        })?;

        fs::write(&tmp, json).map_err(|source| SessionError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "session file saved");
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), SessionError> {
        let path = self.dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }
}
