//! Credential records for registered users.

use std::collections::HashMap;
use std::sync::{
    Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicI64, Ordering},
};

/// A registered user. The password is stored as an Argon2id PHC string,
/// never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Store for registered users, keyed by username.
///
/// Records are created on registration and never mutated or deleted.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<UserStoreInner>,
}

struct UserStoreInner {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(UserStoreInner {
                users: RwLock::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }),
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new user with the next sequential id.
    ///
    /// Returns `None` if the username is already taken. The check and the
    /// insert happen under one write lock, so two concurrent registrations
    /// for the same username cannot both succeed.
    pub fn create(&self, username: &str, password_hash: &str) -> Option<User> {
        let mut users = self.write();

        if users.contains_key(username) {
            return None;
        }

        let user = User {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(username.to_string(), user.clone());

        Some(user)
    }

    /// Get a user by username.
    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.read().get(username).cloned()
    }

    /// Number of registered users.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, User>> {
        self.inner
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, User>> {
        self.inner
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = UserStore::new();

        let alice = store.create("alice", "hash-a").unwrap();
        let bob = store.create("bob", "hash-b").unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = UserStore::new();

        assert!(store.create("alice", "hash-1").is_some());
        assert!(store.create("alice", "hash-2").is_none());

        // Only the first record survives
        assert_eq!(store.count(), 1);
        let user = store.get_by_username("alice").unwrap();
        assert_eq!(user.password_hash, "hash-1");
    }

    #[test]
    fn test_get_unknown_user() {
        let store = UserStore::new();
        assert!(store.get_by_username("nobody").is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = UserStore::new();
        let clone = store.clone();

        store.create("alice", "hash").unwrap();
        assert!(clone.get_by_username("alice").is_some());
    }

    #[test]
    fn test_concurrent_duplicate_registration_single_winner() {
        let store = UserStore::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.create("alice", &format!("hash-{}", i)))
            })
            .collect();

        let winners: Vec<User> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(winners.len(), 1);
        assert_eq!(store.count(), 1);

        // The record that survives is the winner's, not a later loser's
        let survivor = store.get_by_username("alice").unwrap();
        assert_eq!(survivor.password_hash, winners[0].password_hash);
    }

    #[test]
    fn test_concurrent_registrations_get_unique_ids() {
        let store = UserStore::new();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.create(&format!("user-{}", i), "hash").unwrap().id
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<i64>>());
        assert_eq!(store.count(), 32);
    }
}
