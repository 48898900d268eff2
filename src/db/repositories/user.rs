use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::db::StoreError;
use crate::entities::{prelude::*, users};
use crate::models::User;

/// Stored credentials for a single user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a user. A taken username surfaces as [`StoreError::Conflict`].
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let active = users::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(User::from(model))
    }

    /// Get user by username together with the password hash (for login)
    pub async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>, StoreError> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            Credentials {
                user: User::from(u),
                password_hash,
            }
        }))
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Users::find().count(&self.conn).await?)
    }
}
