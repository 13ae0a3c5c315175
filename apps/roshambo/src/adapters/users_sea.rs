//! SeaORM adapter for the user store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{User, UserId};
use crate::entities::users;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{page_offset, PageList, UserRepo};

/// SeaORM implementation of UserRepo.
#[derive(Debug, Clone)]
pub struct UserRepoSea {
    db: DatabaseConnection,
}

impl UserRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let user = users::Entity::find()
            .filter(users::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(user.map(User::from))
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: model.id,
            login: model.login,
            current_game_id: model.current_game_id,
        }
    }
}

#[async_trait]
impl UserRepo for UserRepoSea {
    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            login: Set(user.login.clone()),
            current_game_id: Set(user.current_game_id),
        };
        users::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(user.map(User::from))
    }

    async fn get_or_create_by_login(&self, login: &str) -> Result<User, DomainError> {
        if let Some(user) = self.find_by_login(login).await? {
            return Ok(user);
        }

        match self.insert(User::new(Uuid::new_v4(), login)).await {
            Ok(user) => Ok(user),
            Err(DomainError::Conflict(ConflictKind::UniqueLogin, _)) => {
                // another creator won; read theirs
                debug!(login, "login created concurrently, re-reading");
                self.find_by_login(login).await?.ok_or_else(|| {
                    DomainError::not_found(
                        NotFoundKind::User,
                        format!("User '{login}' vanished after unique violation"),
                    )
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            login: Set(user.login.clone()),
            current_game_id: Set(user.current_game_id),
        };
        let updated = model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found(
                NotFoundKind::User,
                format!("User {} not found", user.id),
            ),
            other => map_db_err(other),
        })?;
        Ok(User::from(updated))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn get_page(&self, page: u64, page_size: u64) -> Result<PageList<User>, DomainError> {
        let skip = page_offset(page, page_size)?;
        let total_count = users::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        let items = users::Entity::find()
            .order_by_asc(users::Column::Login)
            .offset(skip)
            .limit(page_size)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(PageList::new(items, total_count, page, page_size))
    }
}
