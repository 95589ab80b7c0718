use std::{
    fs,
    path::{Path, PathBuf},
};

use api_types::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What is written to disk for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,
}

/// Current user, mirrored to a JSON file so it survives restarts.
///
/// Only a convenience for skipping the login screen; the server never sees it.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    current: Option<StoredSession>,
}

impl Session {
    /// Reads the persisted user, if any. A missing file means signed out.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(content) => Some(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, current })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref().map(|session| &session.user)
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|session| session.signed_in_at)
    }

    pub fn set_current_user(&mut self, user: User) -> Result<()> {
        let session = StoredSession {
            user,
            signed_in_at: Utc::now(),
        };
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, payload)?;
        self.current = Some(session);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.current = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_sessions")
            .join(format!("session_{}.json", uuid::Uuid::new_v4()))
    }

    fn ash() -> User {
        User {
            id: 1,
            name: "Ash".to_string(),
            email: "ash@kanto.test".to_string(),
        }
    }

    #[test]
    fn missing_file_means_signed_out() {
        let session = Session::load(scratch_path()).unwrap();
        assert!(session.current_user().is_none());
    }

    #[test]
    fn user_survives_reload_until_cleared() {
        let path = scratch_path();
        let mut session = Session::load(&path).unwrap();
        session.set_current_user(ash()).unwrap();

        let reloaded = Session::load(&path).unwrap();
        assert_eq!(reloaded.current_user(), Some(&ash()));
        assert!(reloaded.signed_in_at().is_some());

        session.clear().unwrap();
        assert!(session.current_user().is_none());
        assert!(Session::load(&path).unwrap().current_user().is_none());
        assert!(session.clear().is_ok());
    }

    #[test]
    fn overwrite_replaces_user() {
        let path = scratch_path();
        let mut session = Session::load(&path).unwrap();
        session.set_current_user(ash()).unwrap();
        let misty = User {
            id: 2,
            name: "Misty".to_string(),
            email: "misty@cerulean.test".to_string(),
        };
        session.set_current_user(misty.clone()).unwrap();
        assert_eq!(Session::load(&path).unwrap().current_user(), Some(&misty));
        session.clear().unwrap();
    }
}
