use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{BookId, UserId};
use crate::tags::Tag;
use crate::users::UserRead;

/// A book in its owner's library. Ownership never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub owner_id: UserId,
}

impl From<CreateBookDto> for NewBook {
    fn from(dto: CreateBookDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            owner_id: dto.owner_id,
        }
    }
}

/// Book with its owner and tags resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookRead {
    pub id: BookId,
    pub title: String,
    pub description: Option<String>,
    pub owner: UserRead,
    pub tags: Vec<Tag>,
}

impl BookRead {
    pub fn assemble(book: Book, owner: UserRead, tags: Vec<Tag>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
            owner,
            tags,
        }
    }
}
