//! In-memory user directory.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use common::DirectoryError;
use domain::{NewUser, User, UserId};

use super::UserDirectory;

#[derive(Debug)]
struct Store {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

/// Reference `UserDirectory` kept entirely in process memory.
///
/// Identifiers start at 1 and only ever grow, so a deleted id is never
/// handed out again.
#[derive(Debug)]
pub struct InMemoryDirectory {
    store: Mutex<Store>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored users
    pub fn len(&self) -> Result<usize, DirectoryError> {
        Ok(self.lock()?.users.len())
    }

    pub fn is_empty(&self) -> Result<bool, DirectoryError> {
        Ok(self.lock()?.users.is_empty())
    }

    /// Copy of every stored user, ordered by identifier
    pub fn snapshot(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, DirectoryError> {
        self.store
            .lock()
            .map_err(|_| DirectoryError::unavailable("in-memory directory lock poisoned"))
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DirectoryError> {
        let mut store = self.lock()?;

        let id = store.next_id;
        store.next_id += 1;

        let user = user.with_id(id);
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<(), DirectoryError> {
        let mut store = self.lock()?;

        match store.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user;
                Ok(())
            }
            None => Err(DirectoryError::NotFound),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), DirectoryError> {
        self.lock()?.users.remove(&id);
        Ok(())
    }
}
