//! Persisted credential storage.
//!
//! Stores the session token and user profile in
//! `<home>/credentials.json` with restricted permissions (0600).
//! Only these two fields are ever durable; nothing else of the session
//! survives a restart.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::types::UserProfile;
use crate::config::paths;

/// The persisted subset of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Bearer token issued at login/registration.
    pub token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Returns the path to the credential file.
pub fn credentials_path() -> PathBuf {
    paths::credentials_path()
}

/// Saves the token and user profile to disk.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save(token: &str, user: &UserProfile) -> Result<()> {
    save_to(&credentials_path(), token, user)
}

/// Loads the stored credentials, if any.
///
/// Never fails: a missing file reports `None`, and an unreadable or
/// unparseable payload is treated as absent and the file is removed so
/// the corruption does not persist.
pub fn load() -> Option<StoredCredentials> {
    load_from(&credentials_path())
}

/// Removes the stored credentials.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear() -> Result<()> {
    clear_at(&credentials_path())
}

/// Saves credentials to a specific path.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_to(path: &Path, token: &str, user: &UserProfile) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let stored = StoredCredentials {
        token: token.to_string(),
        user: user.clone(),
    };
    let contents =
        serde_json::to_string_pretty(&stored).context("Failed to serialize credentials")?;

    // Write with restricted permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Loads credentials from a specific path, self-healing on corruption.
pub fn load_from(path: &Path) -> Option<StoredCredentials> {
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable credential file, clearing");
            let _ = fs::remove_file(path);
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(stored) => Some(stored),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt credential file, clearing");
            let _ = fs::remove_file(path);
            None
        }
    }
}

/// Removes the credential file at a specific path.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_at(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}
