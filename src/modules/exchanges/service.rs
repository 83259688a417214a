use std::collections::HashMap;

use anyhow::anyhow;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_db::Store;
use bookswap_models::{
    BookId, BookRead, CreateExchangeDto, ExchangeRequest, ExchangeRequestId, ExchangeRequestRead,
    RequestStatus, UserId, UserRead,
};

use crate::modules::books::service::BookService;

pub struct ExchangeService;

impl ExchangeService {
    /// Opens a pending request for `dto.book_id`. The owner is taken from the
    /// book; requesting one's own book is rejected.
    #[instrument(skip(store))]
    pub async fn request_exchange(
        store: &dyn Store,
        dto: CreateExchangeDto,
    ) -> Result<ExchangeRequest, AppError> {
        let request = store.create_exchange(dto.book_id, dto.requester_id).await?;
        tracing::info!(exchange_id = request.id, "Exchange requested");
        Ok(request)
    }

    pub async fn list_exchanges(store: &dyn Store) -> Result<Vec<ExchangeRequestRead>, AppError> {
        let requests = store.list_exchanges().await?;
        Self::resolve_exchanges(store, requests).await
    }

    #[instrument(skip(store))]
    pub async fn update_status(
        store: &dyn Store,
        id: ExchangeRequestId,
        status: RequestStatus,
    ) -> Result<ExchangeRequest, AppError> {
        let request = store.transition_exchange(id, status).await?;
        tracing::info!(status = %request.status, "Exchange status updated");
        Ok(request)
    }

    /// Resolves book, requester and owner of each request. Order is preserved.
    pub async fn resolve_exchanges(
        store: &dyn Store,
        requests: Vec<ExchangeRequest>,
    ) -> Result<Vec<ExchangeRequestRead>, AppError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let mut book_ids: Vec<BookId> = requests.iter().map(|r| r.book_id).collect();
        book_ids.sort_unstable();
        book_ids.dedup();
        let books = store.books_by_ids(&book_ids).await?;
        let books: HashMap<BookId, BookRead> = BookService::resolve_books(store, books)
            .await?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        let mut user_ids: Vec<UserId> = requests
            .iter()
            .flat_map(|r| [r.requester_id, r.owner_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users: HashMap<UserId, UserRead> = store
            .users_by_ids(&user_ids)
            .await?
            .iter()
            .map(|user| (user.id, user.to_read()))
            .collect();

        let lookup_user = |id: UserId| {
            users.get(&id).cloned().ok_or_else(|| {
                AppError::internal(anyhow!("User {} referenced by an exchange is missing", id))
            })
        };

        requests
            .into_iter()
            .map(|request| {
                let book = books.get(&request.book_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow!(
                        "Book {} referenced by exchange {} is missing",
                        request.book_id,
                        request.id
                    ))
                })?;
                Ok(ExchangeRequestRead {
                    id: request.id,
                    status: request.status,
                    created_at: request.created_at,
                    book,
                    requester: lookup_user(request.requester_id)?,
                    owner: lookup_user(request.owner_id)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookswap_core::ErrorKind;
    use bookswap_db::InMemoryStore;
    use bookswap_models::{NewBook, NewUser};

    struct Fixture {
        store: InMemoryStore,
        owner: UserId,
        requester: UserId,
        book: BookId,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let mut ids = Vec::new();
        for username in ["owner", "requester"] {
            let user = store
                .create_user(NewUser {
                    username: username.to_string(),
                    hashed_password: "x".to_string(),
                    bio: None,
                    preferences: None,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        let book = store
            .create_book(NewBook {
                title: "Solaris".to_string(),
                description: None,
                owner_id: ids[0],
            })
            .await
            .unwrap();
        Fixture {
            store,
            owner: ids[0],
            requester: ids[1],
            book: book.id,
        }
    }

    #[tokio::test]
    async fn test_new_exchange_is_pending_then_accepted() {
        let f = fixture().await;
        let request = ExchangeService::request_exchange(
            &f.store,
            CreateExchangeDto {
                book_id: f.book,
                requester_id: f.requester,
            },
        )
        .await
        .unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.owner_id, f.owner);

        ExchangeService::update_status(&f.store, request.id, RequestStatus::Accepted)
            .await
            .unwrap();

        let listed = ExchangeService::list_exchanges(&f.store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, RequestStatus::Accepted);
        assert_eq!(listed[0].book.title, "Solaris");
        assert_eq!(listed[0].requester.username, "requester");
        assert_eq!(listed[0].owner.username, "owner");
    }

    #[tokio::test]
    async fn test_terminal_status_cannot_change() {
        let f = fixture().await;
        let request = f.store.create_exchange(f.book, f.requester).await.unwrap();
        ExchangeService::update_status(&f.store, request.id, RequestStatus::Rejected)
            .await
            .unwrap();

        let err = ExchangeService::update_status(&f.store, request.id, RequestStatus::Accepted)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let stored = f.store.get_exchange(request.id).await.unwrap();
        assert_eq!(stored.status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn test_requesting_own_book_is_rejected() {
        let f = fixture().await;
        let err = ExchangeService::request_exchange(
            &f.store,
            CreateExchangeDto {
                book_id: f.book,
                requester_id: f.owner,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(f.store.list_exchanges().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_exchange() {
        let f = fixture().await;
        let err = ExchangeService::update_status(&f.store, 77, RequestStatus::Accepted)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
