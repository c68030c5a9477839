//! The session store.

use crate::MenuItem;
use console_storage::{CredentialStorage, StorageKeys};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

/// Session error type.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] console_storage::StorageError),
}

/// Result type alias using SessionError.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Default)]
struct SessionData {
    token: String,
    user_id: String,
    username: String,
    menus: Vec<MenuItem>,
}

/// In-memory session state plus its durable persistence.
///
/// All reads and writes go through one lock, so a reader never observes a
/// partially updated identity. An empty token means unauthenticated: the
/// other identity fields then read as absent regardless of what is stored.
pub struct SessionStore {
    storage: Box<dyn CredentialStorage>,
    data: Mutex<SessionData>,
}

impl SessionStore {
    /// Create a new session store over the given storage backend.
    pub fn new(storage: Box<dyn CredentialStorage>) -> Self {
        Self {
            storage,
            data: Mutex::new(SessionData::default()),
        }
    }

    /// Populate memory from durable storage.
    ///
    /// No network access; calling it again just re-reads the same keys.
    pub fn load(&self) -> SessionResult<()> {
        let token = self.storage.get(StorageKeys::TOKEN)?.unwrap_or_default();
        let user_id = self.storage.get(StorageKeys::USER_ID)?.unwrap_or_default();
        let username = self.storage.get(StorageKeys::USERNAME)?.unwrap_or_default();

        let mut data = self.data.lock().unwrap();
        data.token = token;
        data.user_id = user_id;
        data.username = username;

        if data.token.is_empty() {
            info!("No stored session found");
        } else {
            info!(username = %data.username, "Restored session from storage");
        }
        Ok(())
    }

    /// Overwrite the full identity in memory and durable storage.
    ///
    /// The cached menu tree is cleared; callers fetch the fresh tree and
    /// install it with [`set_menus`](Self::set_menus) afterwards.
    pub fn set_login_state(
        &self,
        token: &str,
        user_id: &str,
        username: &str,
    ) -> SessionResult<()> {
        let mut data = self.data.lock().unwrap();

        self.storage.set(StorageKeys::TOKEN, token)?;
        self.storage.set(StorageKeys::USER_ID, user_id)?;
        self.storage.set(StorageKeys::USERNAME, username)?;

        data.token = token.to_string();
        data.user_id = user_id.to_string();
        data.username = username.to_string();
        data.menus.clear();

        info!(user_id = %user_id, username = %username, "Login state updated");
        Ok(())
    }

    /// Replace the cached menu tree. Memory only; menus are refetched after a
    /// restart.
    pub fn set_menus(&self, menus: Vec<MenuItem>) {
        let mut data = self.data.lock().unwrap();
        data.menus = menus;
    }

    /// Clear identity and menus from memory and durable storage.
    ///
    /// Safe to call repeatedly; clearing an already-empty session is a no-op.
    pub fn logout(&self) -> SessionResult<()> {
        let mut data = self.data.lock().unwrap();

        self.storage.delete(StorageKeys::TOKEN)?;
        self.storage.delete(StorageKeys::USER_ID)?;
        self.storage.delete(StorageKeys::USERNAME)?;

        *data = SessionData::default();

        info!("Session cleared");
        Ok(())
    }

    /// True iff a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        !self.data.lock().unwrap().token.is_empty()
    }

    /// Current bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        let data = self.data.lock().unwrap();
        if data.token.is_empty() {
            None
        } else {
            Some(data.token.clone())
        }
    }

    /// Current user id. Absent whenever the token is absent.
    pub fn user_id(&self) -> Option<String> {
        let data = self.data.lock().unwrap();
        if data.token.is_empty() || data.user_id.is_empty() {
            None
        } else {
            Some(data.user_id.clone())
        }
    }

    /// Current username. Absent whenever the token is absent.
    pub fn username(&self) -> Option<String> {
        let data = self.data.lock().unwrap();
        if data.token.is_empty() || data.username.is_empty() {
            None
        } else {
            Some(data.username.clone())
        }
    }

    /// Cached menu tree; empty whenever the token is absent.
    pub fn menus(&self) -> Vec<MenuItem> {
        let data = self.data.lock().unwrap();
        if data.token.is_empty() {
            Vec::new()
        } else {
            data.menus.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_storage::StorageResult;
    use std::collections::HashMap;

    /// In-memory storage for testing.
    struct MemoryStorage {
        data: Mutex<HashMap<String, String>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                data: Mutex::new(HashMap::new()),
            }
        }
    }

    impl CredentialStorage for MemoryStorage {
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.data
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        fn delete(&self, key: &str) -> StorageResult<bool> {
            Ok(self.data.lock().unwrap().remove(key).is_some())
        }
    }

    fn create_test_store() -> SessionStore {
        SessionStore::new(Box::new(MemoryStorage::new()))
    }

    fn sample_menu() -> MenuItem {
        MenuItem {
            id: 1,
            parent_id: None,
            menu_name: "Dashboard".to_string(),
            path: "/dashboard".to_string(),
            component: None,
            icon: None,
            order_num: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_fresh_store_is_unauthenticated() {
        let store = create_test_store();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
        assert_eq!(store.user_id(), None);
        assert_eq!(store.username(), None);
        assert!(store.menus().is_empty());
    }

    #[test]
    fn test_set_login_state_populates_everything() {
        let store = create_test_store();
        store.set_login_state("jwt-abc", "42", "admin").unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("jwt-abc".to_string()));
        assert_eq!(store.user_id(), Some("42".to_string()));
        assert_eq!(store.username(), Some("admin".to_string()));
    }

    #[test]
    fn test_login_state_survives_load() {
        let storage = Box::new(MemoryStorage::new());
        storage.set(StorageKeys::TOKEN, "jwt-abc").unwrap();
        storage.set(StorageKeys::USER_ID, "42").unwrap();
        storage.set(StorageKeys::USERNAME, "admin").unwrap();

        let store = SessionStore::new(storage);
        assert!(!store.is_authenticated());

        store.load().unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.username(), Some("admin".to_string()));
    }

    #[test]
    fn test_load_is_idempotent() {
        let storage = Box::new(MemoryStorage::new());
        storage.set(StorageKeys::TOKEN, "jwt-abc").unwrap();

        let store = SessionStore::new(storage);
        store.load().unwrap();
        store.load().unwrap();
        assert_eq!(store.token(), Some("jwt-abc".to_string()));
    }

    #[test]
    fn test_set_login_state_clears_cached_menus() {
        let store = create_test_store();
        store.set_login_state("jwt-abc", "42", "admin").unwrap();
        store.set_menus(vec![sample_menu()]);
        assert_eq!(store.menus().len(), 1);

        store.set_login_state("jwt-def", "7", "other").unwrap();
        assert!(store.menus().is_empty());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let store = create_test_store();
        store.set_login_state("jwt-abc", "42", "admin").unwrap();
        store.set_menus(vec![sample_menu()]);

        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
        assert_eq!(store.user_id(), None);
        assert_eq!(store.username(), None);
        assert!(store.menus().is_empty());

        // A reload must not resurrect the identity
        store.load().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_twice_is_idempotent() {
        let store = create_test_store();
        store.set_login_state("jwt-abc", "42", "admin").unwrap();

        store.logout().unwrap();
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_absent_token_hides_leftover_identity() {
        // Storage holds identity fields but no token; the invariant says they
        // must read as absent.
        let storage = Box::new(MemoryStorage::new());
        storage.set(StorageKeys::USER_ID, "42").unwrap();
        storage.set(StorageKeys::USERNAME, "admin").unwrap();

        let store = SessionStore::new(storage);
        store.load().unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(store.user_id(), None);
        assert_eq!(store.username(), None);
    }

    #[test]
    fn test_empty_token_counts_as_unauthenticated() {
        let store = create_test_store();
        store.set_login_state("", "42", "admin").unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.user_id(), None);
    }

    #[test]
    fn test_menus_hidden_when_unauthenticated() {
        let store = create_test_store();
        store.set_login_state("jwt-abc", "42", "admin").unwrap();
        store.set_menus(vec![sample_menu()]);
        assert_eq!(store.menus().len(), 1);

        store.logout().unwrap();
        assert!(store.menus().is_empty());
    }
}
