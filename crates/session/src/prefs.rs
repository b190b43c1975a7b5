//! Persisted client-side preferences.
//!
//! Exactly two values survive across sessions: the bearer credential and
//! the preferred display currency. They live in a small TOML file under
//! the platform config directory; there is no schema evolution to worry
//! about.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use neon_bazaar_core::CurrencyCode;

const PREFS_FILE: &str = "prefs.toml";

/// Errors that can occur when reading or writing preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Filesystem access failed.
    #[error("prefs I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The prefs file is not valid TOML.
    #[error("prefs parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization to TOML failed.
    #[error("prefs encode error: {0}")]
    Encode(#[from] toml::ser::Error),

    /// No platform config directory could be determined.
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// The persisted values.
#[derive(Debug, Clone, Default)]
pub struct StoredPrefs {
    /// Bearer credential from the last sign-in, if any.
    pub token: Option<SecretString>,
    /// Preferred display currency.
    pub currency: CurrencyCode,
}

/// On-disk TOML shape. The token is stored in the clear, like the browser
/// original kept it in local storage; the file lives in the user's own
/// config directory.
#[derive(Serialize, Deserialize, Default)]
struct PrefsFile {
    token: Option<String>,
    currency: Option<CurrencyCode>,
}

/// Handle to the preferences file.
#[derive(Debug, Clone)]
pub struct Prefs {
    path: PathBuf,
}

impl Prefs {
    /// The standard per-user location.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::NoConfigDir`] if the platform has no config
    /// directory.
    pub fn standard() -> Result<Self, PrefsError> {
        let dirs = directories::ProjectDirs::from("uz", "neon-bazaar", "bazaar")
            .ok_or(PrefsError::NoConfigDir)?;
        Ok(Self {
            path: dirs.config_dir().join(PREFS_FILE),
        })
    }

    /// A preferences file at an explicit path.
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored preferences. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<StoredPrefs, PrefsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredPrefs::default());
            }
            Err(e) => return Err(e.into()),
        };
        let file: PrefsFile = toml::from_str(&raw)?;

        Ok(StoredPrefs {
            token: file.token.map(SecretString::from),
            currency: file.currency.unwrap_or_default(),
        })
    }

    /// Write the preferences, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, prefs: &StoredPrefs) -> Result<(), PrefsError> {
        let file = PrefsFile {
            token: prefs
                .token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
            currency: Some(prefs.currency),
        };
        let raw = toml::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::at(dir.path().join("nope").join(PREFS_FILE));

        let stored = prefs.load().unwrap();
        assert!(stored.token.is_none());
        assert_eq!(stored.currency, CurrencyCode::UZS);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::at(dir.path().join("deep").join(PREFS_FILE));

        prefs
            .save(&StoredPrefs {
                token: Some("token-123".to_string().into()),
                currency: CurrencyCode::USD,
            })
            .unwrap();

        let stored = prefs.load().unwrap();
        assert_eq!(stored.token.unwrap().expose_secret(), "token-123");
        assert_eq!(stored.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_save_without_token_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Prefs::at(dir.path().join(PREFS_FILE));

        prefs
            .save(&StoredPrefs {
                token: Some("token-123".to_string().into()),
                currency: CurrencyCode::UZS,
            })
            .unwrap();
        prefs.save(&StoredPrefs::default()).unwrap();

        assert!(prefs.load().unwrap().token.is_none());
    }
}
