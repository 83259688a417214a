use bookswap_models::{
    Book, BookId, BookTagLink, ExchangeRequest, ExchangeRequestId, NewBook, NewUser,
    RequestStatus, Tag, TagId, User, UserId,
};

use crate::error::StoreResult;

/// Persistence for the user/book/tag/exchange graph.
///
/// Every method is one unit of work: it either applies completely or not at
/// all. Lookups by id return [`StoreError::NotFound`](crate::StoreError::NotFound)
/// when the row is absent; `find_*` lookups return `None` instead.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user, failing with `UsernameTaken` if the username exists
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;
    async fn get_user(&self, id: UserId) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    /// Lists all users ordered by id
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Users with the given ids; unknown ids are skipped
    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;
    /// Replaces the stored password hash of an existing user
    async fn update_password(&self, id: UserId, hashed_password: &str) -> StoreResult<()>;

    /// Inserts a tag, failing with `TagNameTaken` if the name exists
    async fn create_tag(&self, name: &str) -> StoreResult<Tag>;
    async fn get_tag(&self, id: TagId) -> StoreResult<Tag>;
    /// Lists all tags ordered by id
    async fn list_tags(&self) -> StoreResult<Vec<Tag>>;
    /// Links a tag to a book and returns the link row with `true`. If the pair
    /// was already linked nothing is written and the existing row comes back
    /// with `false`.
    async fn attach_tag(
        &self,
        book_id: BookId,
        tag_id: TagId,
    ) -> StoreResult<(BookTagLink, bool)>;
    /// Tags of the given books as `(book_id, tag)` pairs ordered by book then tag id
    async fn tags_by_book(&self, book_ids: &[BookId]) -> StoreResult<Vec<(BookId, Tag)>>;

    /// Inserts a book, failing with `NotFound` if the owner does not exist
    async fn create_book(&self, new_book: NewBook) -> StoreResult<Book>;
    async fn get_book(&self, id: BookId) -> StoreResult<Book>;
    /// Lists all books ordered by id
    async fn list_books(&self) -> StoreResult<Vec<Book>>;
    async fn books_by_ids(&self, ids: &[BookId]) -> StoreResult<Vec<Book>>;
    async fn books_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<Book>>;

    /// Creates a pending exchange request for a book. The owner is read from
    /// the book inside the same unit of work.
    async fn create_exchange(
        &self,
        book_id: BookId,
        requester_id: UserId,
    ) -> StoreResult<ExchangeRequest>;
    async fn get_exchange(&self, id: ExchangeRequestId) -> StoreResult<ExchangeRequest>;
    /// Lists all exchange requests ordered by id
    async fn list_exchanges(&self) -> StoreResult<Vec<ExchangeRequest>>;
    /// Requests where the user is either requester or owner, ordered by id
    async fn exchanges_for_user(&self, user_id: UserId) -> StoreResult<Vec<ExchangeRequest>>;
    /// Moves a request to `status`, failing with `InvalidTransition` unless the
    /// current status allows it. A rejected transition leaves the row unchanged.
    async fn transition_exchange(
        &self,
        id: ExchangeRequestId,
        status: RequestStatus,
    ) -> StoreResult<ExchangeRequest>;

    /// Deletes every row of every table
    async fn clear(&self) -> StoreResult<()>;
}
