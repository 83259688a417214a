use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use bookswap_models::{
    Book, BookId, BookTagLink, ExchangeRequest, ExchangeRequestId, NewBook, NewUser,
    RequestStatus, Tag, TagId, User, UserId,
};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    tags: BTreeMap<TagId, Tag>,
    books: BTreeMap<BookId, Book>,
    links: BTreeMap<(BookId, TagId), DateTime<Utc>>,
    exchanges: BTreeMap<ExchangeRequestId, ExchangeRequest>,
    last_user_id: i64,
    last_tag_id: i64,
    last_book_id: i64,
    last_exchange_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Store backed by process memory.
///
/// All tables live behind one lock. Each operation takes the lock once and
/// holds it until it returns, so multi-step checks never interleave.
#[derive(Default)]
pub struct InMemoryStore {
    tables: parking_lot::RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored book/tag links.
    pub fn link_count(&self) -> usize {
        self.tables.read().links.len()
    }
}

#[async_trait::async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write();
        if tables
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(StoreError::UsernameTaken(new_user.username));
        }

        let user = User {
            id: next_id(&mut tables.last_user_id),
            username: new_user.username,
            hashed_password: new_user.hashed_password,
            bio: new_user.bio,
            preferences: new_user.preferences,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.tables
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("User", id))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().users.values().cloned().collect())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let tables = self.tables.read();
        Ok(tables
            .users
            .values()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn update_password(&self, id: UserId, hashed_password: &str) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("User", id))?;
        user.hashed_password = hashed_password.to_string();
        Ok(())
    }

    async fn create_tag(&self, name: &str) -> StoreResult<Tag> {
        let mut tables = self.tables.write();
        if tables.tags.values().any(|tag| tag.name == name) {
            return Err(StoreError::TagNameTaken(name.to_string()));
        }

        let tag = Tag {
            id: next_id(&mut tables.last_tag_id),
            name: name.to_string(),
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn get_tag(&self, id: TagId) -> StoreResult<Tag> {
        self.tables
            .read()
            .tags
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Tag", id))
    }

    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(self.tables.read().tags.values().cloned().collect())
    }

    async fn attach_tag(
        &self,
        book_id: BookId,
        tag_id: TagId,
    ) -> StoreResult<(BookTagLink, bool)> {
        let mut tables = self.tables.write();
        if !tables.books.contains_key(&book_id) {
            return Err(StoreError::not_found("Book", book_id));
        }
        if !tables.tags.contains_key(&tag_id) {
            return Err(StoreError::not_found("Tag", tag_id));
        }

        let mut created = false;
        let added_at = *tables.links.entry((book_id, tag_id)).or_insert_with(|| {
            created = true;
            Utc::now()
        });
        let link = BookTagLink {
            book_id,
            tag_id,
            added_at,
        };
        Ok((link, created))
    }

    async fn tags_by_book(&self, book_ids: &[BookId]) -> StoreResult<Vec<(BookId, Tag)>> {
        let tables = self.tables.read();
        Ok(tables
            .links
            .keys()
            .filter(|(book_id, _)| book_ids.contains(book_id))
            .filter_map(|(book_id, tag_id)| {
                tables.tags.get(tag_id).map(|tag| (*book_id, tag.clone()))
            })
            .collect())
    }

    async fn create_book(&self, new_book: NewBook) -> StoreResult<Book> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&new_book.owner_id) {
            return Err(StoreError::not_found("User", new_book.owner_id));
        }

        let book = Book {
            id: next_id(&mut tables.last_book_id),
            title: new_book.title,
            description: new_book.description,
            owner_id: new_book.owner_id,
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: BookId) -> StoreResult<Book> {
        self.tables
            .read()
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Book", id))
    }

    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.tables.read().books.values().cloned().collect())
    }

    async fn books_by_ids(&self, ids: &[BookId]) -> StoreResult<Vec<Book>> {
        let tables = self.tables.read();
        Ok(tables
            .books
            .values()
            .filter(|book| ids.contains(&book.id))
            .cloned()
            .collect())
    }

    async fn books_by_owner(&self, owner_id: UserId) -> StoreResult<Vec<Book>> {
        let tables = self.tables.read();
        Ok(tables
            .books
            .values()
            .filter(|book| book.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_exchange(
        &self,
        book_id: BookId,
        requester_id: UserId,
    ) -> StoreResult<ExchangeRequest> {
        let mut tables = self.tables.write();
        let owner_id = tables
            .books
            .get(&book_id)
            .map(|book| book.owner_id)
            .ok_or_else(|| StoreError::not_found("Book", book_id))?;
        if !tables.users.contains_key(&requester_id) {
            return Err(StoreError::not_found("User", requester_id));
        }
        if owner_id == requester_id {
            return Err(StoreError::SelfExchange(requester_id));
        }

        let request = ExchangeRequest {
            id: next_id(&mut tables.last_exchange_id),
            book_id,
            requester_id,
            owner_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        tables.exchanges.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get_exchange(&self, id: ExchangeRequestId) -> StoreResult<ExchangeRequest> {
        self.tables
            .read()
            .exchanges
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Exchange request", id))
    }

    async fn list_exchanges(&self) -> StoreResult<Vec<ExchangeRequest>> {
        Ok(self.tables.read().exchanges.values().cloned().collect())
    }

    async fn exchanges_for_user(&self, user_id: UserId) -> StoreResult<Vec<ExchangeRequest>> {
        let tables = self.tables.read();
        Ok(tables
            .exchanges
            .values()
            .filter(|request| request.requester_id == user_id || request.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn transition_exchange(
        &self,
        id: ExchangeRequestId,
        status: RequestStatus,
    ) -> StoreResult<ExchangeRequest> {
        let mut tables = self.tables.write();
        let request = tables
            .exchanges
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Exchange request", id))?;

        if !request.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: request.status,
                to: status,
            });
        }
        request.status = status;
        Ok(request.clone())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.tables.write() = Tables::default();
        Ok(())
    }
}
