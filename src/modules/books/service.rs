use std::collections::HashMap;

use anyhow::anyhow;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_db::Store;
use bookswap_models::{Book, BookId, BookRead, CreateBookDto, Tag, UserId, UserRead};

pub struct BookService;

impl BookService {
    #[instrument(skip(store))]
    pub async fn create_book(store: &dyn Store, dto: CreateBookDto) -> Result<BookRead, AppError> {
        let book = store.create_book(dto.into()).await?;
        let owner = store.get_user(book.owner_id).await?;
        Ok(BookRead::assemble(book, owner.to_read(), Vec::new()))
    }

    pub async fn list_books(store: &dyn Store) -> Result<Vec<BookRead>, AppError> {
        let books = store.list_books().await?;
        Self::resolve_books(store, books).await
    }

    pub async fn get_book(store: &dyn Store, id: BookId) -> Result<BookRead, AppError> {
        let book = store.get_book(id).await?;
        let mut resolved = Self::resolve_books(store, vec![book]).await?;
        resolved
            .pop()
            .ok_or_else(|| AppError::internal(anyhow!("Book {} vanished while resolving", id)))
    }

    /// Attaches owners and tags to `books`, loading each relation in one query.
    /// Output order follows input order.
    pub async fn resolve_books(
        store: &dyn Store,
        books: Vec<Book>,
    ) -> Result<Vec<BookRead>, AppError> {
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let mut owner_ids: Vec<UserId> = books.iter().map(|book| book.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<UserId, UserRead> = store
            .users_by_ids(&owner_ids)
            .await?
            .iter()
            .map(|user| (user.id, user.to_read()))
            .collect();

        let book_ids: Vec<BookId> = books.iter().map(|book| book.id).collect();
        let mut tags: HashMap<BookId, Vec<Tag>> = HashMap::new();
        for (book_id, tag) in store.tags_by_book(&book_ids).await? {
            tags.entry(book_id).or_default().push(tag);
        }

        books
            .into_iter()
            .map(|book| {
                let owner = owners.get(&book.owner_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow!(
                        "Owner {} of book {} is missing",
                        book.owner_id,
                        book.id
                    ))
                })?;
                let book_tags = tags.remove(&book.id).unwrap_or_default();
                Ok(BookRead::assemble(book, owner, book_tags))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookswap_core::ErrorKind;
    use bookswap_db::InMemoryStore;
    use bookswap_models::NewUser;

    async fn create_owner(store: &InMemoryStore, username: &str) -> UserId {
        store
            .create_user(NewUser {
                username: username.to_string(),
                hashed_password: "x".to_string(),
                bio: None,
                preferences: None,
            })
            .await
            .unwrap()
            .id
    }

    fn book_dto(title: &str, owner_id: UserId) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            description: Some("paperback".to_string()),
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_create_book_for_missing_owner() {
        let store = InMemoryStore::new();
        let err = BookService::create_book(&store, book_dto("Dune", 9))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_books_resolves_owner_and_tags() {
        let store = InMemoryStore::new();
        let alice = create_owner(&store, "alice").await;
        let bob = create_owner(&store, "bob").await;
        let dune = BookService::create_book(&store, book_dto("Dune", alice))
            .await
            .unwrap();
        BookService::create_book(&store, book_dto("Emma", bob))
            .await
            .unwrap();
        let scifi = store.create_tag("scifi").await.unwrap();
        let classic = store.create_tag("classic").await.unwrap();
        store.attach_tag(dune.id, scifi.id).await.unwrap();
        store.attach_tag(dune.id, classic.id).await.unwrap();

        let books = BookService::list_books(&store).await.unwrap();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].owner.username, "alice");
        assert_eq!(books[0].tags, vec![scifi, classic]);
        assert_eq!(books[1].owner.username, "bob");
        assert!(books[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let store = InMemoryStore::new();
        let err = BookService::get_book(&store, 1).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
