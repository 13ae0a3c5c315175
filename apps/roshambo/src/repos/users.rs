//! User store: login lookup and the current-game pointer.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{User, UserId};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Store a new user. A taken login is `Conflict(UniqueLogin)`.
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Return the user with `login`, creating it on first use. Concurrent
    /// callers converge on the same record.
    async fn get_or_create_by_login(&self, login: &str) -> Result<User, DomainError>;

    /// Replace a stored user. `NotFound(User)` when it does not exist.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Returns whether a user was removed.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// One page of users ordered by login. Pages are numbered from 1.
    async fn get_page(&self, page: u64, page_size: u64) -> Result<PageList<User>, DomainError>;
}

/// Find user by ID or return error if not found.
pub async fn require_user(repo: &dyn UserRepo, id: UserId) -> Result<User, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, format!("User {id} not found")))
}

/// A page of results plus the paging metadata callers need to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageList<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u64,
    pub page_size: u64,
}

impl<T> PageList<T> {
    pub fn new(items: Vec<T>, total_count: u64, current_page: u64, page_size: u64) -> Self {
        Self {
            items,
            total_count,
            current_page,
            page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

/// Validate 1-based paging arguments and return the number of rows to skip.
pub fn page_offset(page: u64, page_size: u64) -> Result<u64, DomainError> {
    if page == 0 || page_size == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidPage,
            format!("page ({page}) and page size ({page_size}) must be positive"),
        ));
    }
    Ok((page - 1).saturating_mul(page_size))
}
