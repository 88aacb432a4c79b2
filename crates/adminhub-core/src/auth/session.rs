use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use super::storage::Storage;
use crate::models::User;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the serialized user profile
pub const USER_KEY: &str = "user";

/// The logged-in session: a bearer token plus the user profile, kept in
/// persistent storage. Clone is cheap and every clone sees the same storage.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// The stored user profile. A profile that no longer parses is treated
    /// as absent.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user profile is unreadable");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist the token and profile returned by a successful login.
    pub fn save_login(&self, token: &str, user: Option<&User>) -> Result<()> {
        self.storage
            .set(TOKEN_KEY, token)
            .context("Failed to store auth token")?;
        match user {
            Some(user) => {
                let raw = serde_json::to_string(user)?;
                self.storage
                    .set(USER_KEY, &raw)
                    .context("Failed to store user profile")?;
            }
            None => self.storage.remove(USER_KEY)?,
        }
        Ok(())
    }

    /// Remove both session keys. Both removals are attempted even if the
    /// first one fails.
    pub fn clear(&self) -> Result<()> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token.context("Failed to remove auth token")?;
        user.context("Failed to remove user profile")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStorage;

    fn session() -> (Session, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (Session::new(storage.clone()), storage)
    }

    fn user() -> User {
        User {
            id: 1,
            name: Some("Ana Admin".to_string()),
            email: "ana@example.com".to_string(),
            role: Some("admin".to_string()),
        }
    }

    #[test]
    fn test_save_login_and_read_back() {
        let (session, storage) = session();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());

        session.save_login("tok-123", Some(&user())).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        assert_eq!(session.user(), Some(user()));
        assert!(storage.get(USER_KEY).unwrap().contains("ana@example.com"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let (session, storage) = session();
        session.save_login("tok-123", Some(&user())).unwrap();

        session.clear().unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let (session, storage) = session();
        storage.set(TOKEN_KEY, "").unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_unreadable_user_is_absent() {
        let (session, storage) = session();
        storage.set(USER_KEY, "{broken").unwrap();
        assert!(session.user().is_none());
    }
}
