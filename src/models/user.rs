use serde::Serialize;

use crate::domain::UserId;
use crate::entities::users;

/// User data without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            created_at: model.created_at,
        }
    }
}
