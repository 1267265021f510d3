use crate::models::User;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Signed-in user with the bearer token the API issued
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Holds the current session, optionally mirrored to a JSON file
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store; nothing survives the process
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by `path`, restoring a saved session if one is readable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    info!("Restored session for {}", session.user.email);
                    Some(session)
                }
                Err(e) => {
                    warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read session file {}: {}", path.display(), e);
                None
            }
        };

        Self {
            session,
            path: Some(path),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn login(&mut self, user: User, token: String) {
        self.session = Some(Session { user, token });
        self.persist();
    }

    /// Swap the user record and keep the token
    pub fn replace_user(&mut self, user: User) {
        if let Some(session) = self.session.as_mut() {
            session.user = user;
            self.persist();
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        let result = match &self.session {
            Some(session) => write_session(path, session),
            None => match std::fs::remove_file(path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
        };

        match result {
            Ok(()) => debug!("Session file {} updated", path.display()),
            Err(e) => warn!("Could not update session file {}: {}", path.display(), e),
        }
    }
}

fn write_session(path: &Path, session: &Session) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}
