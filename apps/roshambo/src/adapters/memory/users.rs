use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::{User, UserId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::users::{page_offset, PageList, UserRepo};

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<UserId, User>,
    by_login: HashMap<String, UserId>,
}

/// In-memory user store. Both indexes live behind one lock so the unique
/// login check and the insert are a single step.
#[derive(Debug, Default)]
pub struct UserRepoMemory {
    inner: Mutex<Inner>,
}

impl UserRepoMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn insert(&mut self, user: User) -> Result<User, DomainError> {
        if self.by_login.contains_key(&user.login) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueLogin,
                format!("Login '{}' already taken", user.login),
            ));
        }
        if self.by_id.contains_key(&user.id) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateId,
                format!("User {} already exists", user.id),
            ));
        }
        self.by_login.insert(user.login.clone(), user.id);
        self.by_id.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepo for UserRepoMemory {
    async fn insert(&self, user: User) -> Result<User, DomainError> {
        self.inner.lock().insert(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.inner.lock().by_id.get(&id).cloned())
    }

    async fn get_or_create_by_login(&self, login: &str) -> Result<User, DomainError> {
        let mut inner = self.inner.lock();
        if let Some(user) = inner.by_login.get(login).and_then(|id| inner.by_id.get(id)) {
            return Ok(user.clone());
        }
        inner.insert(User::new(Uuid::new_v4(), login))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut inner = self.inner.lock();
        let Some(previous) = inner.by_id.get(&user.id).cloned() else {
            return Err(DomainError::not_found(
                NotFoundKind::User,
                format!("User {} not found", user.id),
            ));
        };
        if previous.login != user.login {
            if inner.by_login.contains_key(&user.login) {
                return Err(DomainError::conflict(
                    ConflictKind::UniqueLogin,
                    format!("Login '{}' already taken", user.login),
                ));
            }
            inner.by_login.remove(&previous.login);
            inner.by_login.insert(user.login.clone(), user.id);
        }
        inner.by_id.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut inner = self.inner.lock();
        match inner.by_id.remove(&id) {
            Some(user) => {
                inner.by_login.remove(&user.login);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_page(&self, page: u64, page_size: u64) -> Result<PageList<User>, DomainError> {
        let skip = page_offset(page, page_size)?;
        let inner = self.inner.lock();
        let mut users: Vec<&User> = inner.by_id.values().collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));

        let total_count = users.len() as u64;
        let items = users
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(PageList::new(items, total_count, page, page_size))
    }
}
