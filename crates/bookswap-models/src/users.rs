use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::books::BookRead;
use crate::exchanges::ExchangeRequestRead;
use crate::ids::UserId;

/// A registered user as stored. Never serialized directly; use [`UserRead`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub hashed_password: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
}

impl User {
    pub fn to_read(&self) -> UserRead {
        UserRead {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRead {
    pub id: UserId,
    pub username: String,
}

impl From<&User> for UserRead {
    fn from(user: &User) -> Self {
        user.to_read()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
}

impl fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("bio", &self.bio)
            .field("preferences", &self.preferences)
            .finish()
    }
}

/// A user with the books they own and the exchange requests they sent and received.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetail {
    pub id: UserId,
    pub username: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
    pub books: Vec<BookRead>,
    pub sent_requests: Vec<ExchangeRequestRead>,
    pub received_requests: Vec<ExchangeRequestRead>,
}
