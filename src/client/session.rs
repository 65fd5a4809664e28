// Reader session: theme preference and access token, kept on disk.
//
// One ClientSession value is loaded at startup and handed to whatever needs
// it. Every mutation writes the file straight away, so a crash never loses a
// login or a theme switch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<config dir>/ground/session.json`, or `./ground-session.json` when the
/// platform has no config directory.
pub fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("ground").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("ground-session.json"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Stored {
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientSession {
    path: PathBuf,
    stored: Stored,
}

impl ClientSession {
    /// Load the session file. A missing or unreadable file starts a fresh
    /// session (dark theme, logged out).
    pub fn load(path: &Path) -> Self {
        let stored = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Session file is corrupt, starting fresh");
                Stored::default()
            }),
            Err(_) => {
                debug!(path = %path.display(), "No session file yet");
                Stored::default()
            }
        };
        Self {
            path: path.to_path_buf(),
            stored,
        }
    }

    pub fn theme(&self) -> Theme {
        self.stored.theme
    }

    pub fn token(&self) -> Option<&str> {
        self.stored.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.stored.token.is_some()
    }

    /// Flip between dark and light and persist. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.stored.theme = self.stored.theme.toggled();
        self.save()?;
        Ok(self.stored.theme)
    }

    pub fn set_token(&mut self, token: &str) -> Result<()> {
        self.stored.token = Some(token.to_string());
        self.save()
    }

    /// Forget the token and persist.
    pub fn logout(&mut self) -> Result<()> {
        self.stored.token = None;
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create session directory {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.stored)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ground-session-test-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("session.json")
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = ClientSession::load(&temp_path("fresh"));
        assert_eq!(session.theme(), Theme::Dark);
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_changes_persist_across_loads() {
        let path = temp_path("persist");
        let mut session = ClientSession::load(&path);
        assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
        session.set_token("abc.123.def.sig").unwrap();

        let reloaded = ClientSession::load(&path);
        assert_eq!(reloaded.theme(), Theme::Light);
        assert_eq!(reloaded.token(), Some("abc.123.def.sig"));

        let mut reloaded = reloaded;
        reloaded.logout().unwrap();
        let after_logout = ClientSession::load(&path);
        assert!(!after_logout.is_logged_in());
        assert_eq!(after_logout.theme(), Theme::Light);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        let session = ClientSession::load(&path);
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.token(), None);
    }
}
