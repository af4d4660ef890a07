//! User repository: the single store of user records.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, MSG_USER_NOT_FOUND};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a record whose id was assigned by the auth domain
    async fn insert(&self, user: &User) -> AppResult<Uuid>;

    /// Overwrite every mutable field of an existing record
    async fn update(&self, user: &User) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// PostgreSQL implementation of [`UserRepository`]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, user: &User) -> AppResult<Uuid> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(user.id),
            full_name: Set(user.full_name.clone()),
            image: Set(user.image.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            verified: Set(user.verified),
            two_factor_enabled: Set(user.two_factor_enabled),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let changes = ActiveModel {
            full_name: Set(user.full_name.clone()),
            image: Set(user.image.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            verified: Set(user.verified),
            two_factor_enabled: Set(user.two_factor_enabled),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let result = UserEntity::update_many()
            .set(changes)
            .filter(user::Column::Id.eq(user.id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(MSG_USER_NOT_FOUND));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(MSG_USER_NOT_FOUND));
        }

        Ok(())
    }
}
