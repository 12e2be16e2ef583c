use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    Set,
};
use tracing::debug;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::user;

/// SeaORM-backed user repository.
///
/// Every statement is built by SeaORM with bound parameters.
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        dob: model.dob,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            name: Set(dto.name),
            dob: Set(dto.dob),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await.map_err(db_err)?;
        debug!(user_id = model.id, "Inserted user row");

        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<User> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(user_model_to_domain)
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        let active = user::ActiveModel {
            id: Unchanged(id),
            name: Set(dto.name),
            dob: Set(dto.dob),
        };

        // Single UPDATE .. WHERE id = ?; a zero-row match surfaces as
        // RecordNotUpdated (or RecordNotFound on backends without RETURNING).
        match active.update(&self.db).await {
            Ok(model) => Ok(user_model_to_domain(model)),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(DomainError::user_not_found(id))
            }
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete_user(&self, id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found(id));
        }

        Ok(())
    }
}
