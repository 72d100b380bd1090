//! File-backed session token storage.
//!
//! The token store is the terminal analogue of the browser's local
//! storage: a single opaque string kept at a stable path, written on
//! successful authentication and removed on logout. No expiry and no
//! shape validation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Holds the current session token at a fixed filesystem path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path the token is kept at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the token, creating parent directories as needed.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|err| Error::io("failed to create token directory", err))?;
        }
        fs::write(&self.path, token).map_err(|err| Error::io("failed to write token file", err))
    }

    /// Reads the stored token, if one is present.
    pub fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::io("failed to read token file", err)),
        }
    }

    /// Removes the stored token. Removing an absent token is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::io("failed to remove token file", err)),
        }
    }
}
