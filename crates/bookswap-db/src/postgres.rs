//! PostgreSQL store.
//!
//! Queries are built at runtime with `sqlx::query_as`, so the crate compiles
//! without a live database. Operations that read before they write take the
//! rows they depend on inside one transaction.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use bookswap_models::{
    Book, BookId, BookTagLink, ExchangeRequest, ExchangeRequestId, NewBook, NewUser,
    RequestStatus, Tag, TagId, User, UserId,
};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

const USER_COLUMNS: &str = "id, username, hashed_password, bio, preferences";
const BOOK_COLUMNS: &str = "id, title, description, owner_id";
const LINK_COLUMNS: &str = "book_id, tag_id, added_at";
const EXCHANGE_COLUMNS: &str = "id, book_id, requester_id, owner_id, status, created_at";

/// Opens a connection pool to `database_url`.
pub async fn init_db_pool(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and brings the schema up to date.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = init_db_pool(database_url).await?;
        run_migrations(&pool).await?;
        tracing::info!("Connected to PostgreSQL and applied migrations");
        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, hashed_password, bio, preferences)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.username)
        .bind(&new_user.hashed_password)
        .bind(&new_user.bio)
        .bind(&new_user.preferences)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::UsernameTaken(new_user.username.clone())
            } else {
                err.into()
            }
        })
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn update_password(&self, id: UserId, hashed_password: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET hashed_password = $1 WHERE id = $2")
            .bind(hashed_password)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("User", id));
        }
        Ok(())
    }

    async fn create_tag(&self, name: &str) -> StoreResult<Tag> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::TagNameTaken(name.to_string())
                } else {
                    err.into()
                }
            })
    }

    async fn get_tag(&self, id: TagId) -> StoreResult<Tag> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Tag", id))
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    async fn attach_tag(
        &self,
        book_id: BookId,
        tag_id: TagId,
    ) -> StoreResult<(BookTagLink, bool)> {
        let mut tx = self.pool.begin().await?;

        let book_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;
        if !book_exists {
            return Err(StoreError::not_found("Book", book_id));
        }

        let tag_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tags WHERE id = $1)")
                .bind(tag_id)
                .fetch_one(&mut *tx)
                .await?;
        if !tag_exists {
            return Err(StoreError::not_found("Tag", tag_id));
        }

        let inserted = sqlx::query_as::<_, BookTagLink>(&format!(
            "INSERT INTO book_tag_links (book_id, tag_id) VALUES ($1, $2)
             ON CONFLICT (book_id, tag_id) DO NOTHING
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(book_id)
        .bind(tag_id)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match inserted {
            Some(link) => (link, true),
            None => {
                let existing = sqlx::query_as::<_, BookTagLink>(&format!(
                    "SELECT {LINK_COLUMNS} FROM book_tag_links WHERE book_id = $1 AND tag_id = $2"
                ))
                .bind(book_id)
                .bind(tag_id)
                .fetch_one(&mut *tx)
                .await?;
                (existing, false)
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn tags_by_book(&self, book_ids: &[BookId]) -> StoreResult<Vec<(BookId, Tag)>> {
        let rows = sqlx::query_as::<_, (BookId, TagId, String)>(
            "SELECT l.book_id, t.id, t.name
             FROM book_tag_links l
             JOIN tags t ON t.id = l.tag_id
             WHERE l.book_id = ANY($1)
             ORDER BY l.book_id, t.id",
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(book_id, id, name)| (book_id, Tag { id, name }))
            .collect())
    }

    async fn create_book(&self, new_book: NewBook) -> StoreResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&new_book.title)
        .bind(&new_book.description)
        .bind(new_book.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                StoreError::not_found("User", new_book.owner_id)
            } else {
                err.into()
            }
        })
    }

    async fn get_book(&self, id: BookId) -> StoreResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("Book", id))
    }

    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let books =
            sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(books)
    }

    async fn books_by_ids(&self, ids: &[BookId]) -> StoreResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn books_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn create_exchange(
        &self,
        book_id: BookId,
        requester_id: UserId,
    ) -> StoreResult<ExchangeRequest> {
        let mut tx = self.pool.begin().await?;

        let owner_id: UserId =
            sqlx::query_scalar("SELECT owner_id FROM books WHERE id = $1 FOR SHARE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found("Book", book_id))?;

        let requester_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(requester_id)
                .fetch_one(&mut *tx)
                .await?;
        if !requester_exists {
            return Err(StoreError::not_found("User", requester_id));
        }
        if owner_id == requester_id {
            return Err(StoreError::SelfExchange(requester_id));
        }

        let request = sqlx::query_as::<_, ExchangeRequest>(&format!(
            "INSERT INTO exchange_requests (book_id, requester_id, owner_id, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {EXCHANGE_COLUMNS}"
        ))
        .bind(book_id)
        .bind(requester_id)
        .bind(owner_id)
        .bind(RequestStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(request)
    }

    async fn get_exchange(&self, id: ExchangeRequestId) -> StoreResult<ExchangeRequest> {
        sqlx::query_as::<_, ExchangeRequest>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchange_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("Exchange request", id))
    }

    async fn list_exchanges(&self) -> StoreResult<Vec<ExchangeRequest>> {
        let requests = sqlx::query_as::<_, ExchangeRequest>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchange_requests ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn exchanges_for_user(&self, user_id: UserId) -> StoreResult<Vec<ExchangeRequest>> {
        let requests = sqlx::query_as::<_, ExchangeRequest>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchange_requests
             WHERE requester_id = $1 OR owner_id = $1
             ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn transition_exchange(
        &self,
        id: ExchangeRequestId,
        status: RequestStatus,
    ) -> StoreResult<ExchangeRequest> {
        let mut tx = self.pool.begin().await?;

        let current: RequestStatus =
            sqlx::query_scalar("SELECT status FROM exchange_requests WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| StoreError::not_found("Exchange request", id))?;

        if !current.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        let request = sqlx::query_as::<_, ExchangeRequest>(&format!(
            "UPDATE exchange_requests SET status = $1 WHERE id = $2
             RETURNING {EXCHANGE_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(request)
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query(
            "TRUNCATE exchange_requests, book_tag_links, books, tags, users
             RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
