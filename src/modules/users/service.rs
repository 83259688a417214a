use tracing::instrument;

use bookswap_core::{AppError, hash_password};
use bookswap_db::Store;
use bookswap_models::{CreateUserDto, NewUser, UserDetail, UserId, UserRead};

use crate::modules::books::service::BookService;
use crate::modules::exchanges::service::ExchangeService;

pub struct UserService;

impl UserService {
    #[instrument(skip(store, dto), fields(username = %dto.username))]
    pub async fn create_user(store: &dyn Store, dto: CreateUserDto) -> Result<UserRead, AppError> {
        if store.find_user_by_username(&dto.username).await?.is_some() {
            return Err(AppError::username_taken(&dto.username));
        }

        let hashed_password = hash_password(&dto.password)?;
        let user = store
            .create_user(NewUser {
                username: dto.username,
                hashed_password,
                bio: dto.bio,
                preferences: dto.preferences,
            })
            .await?;

        Ok(user.to_read())
    }

    /// Profile with owned books and the exchange requests the user sent and received.
    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn Store, id: UserId) -> Result<UserDetail, AppError> {
        let user = store.get_user(id).await?;

        let books = store.books_by_owner(id).await?;
        let books = BookService::resolve_books(store, books).await?;

        let requests = store.exchanges_for_user(id).await?;
        let (sent_requests, received_requests): (Vec<_>, Vec<_>) =
            ExchangeService::resolve_exchanges(store, requests)
                .await?
                .into_iter()
                .partition(|request| request.requester.id == id);

        Ok(UserDetail {
            id: user.id,
            username: user.username,
            bio: user.bio,
            preferences: user.preferences,
            books,
            sent_requests,
            received_requests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookswap_core::ErrorKind;
    use bookswap_db::InMemoryStore;
    use bookswap_models::NewBook;

    fn user_dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "secret".to_string(),
            bio: Some("reads a lot".to_string()),
            preferences: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_keeps_profile_fields() {
        let store = InMemoryStore::new();
        let created = UserService::create_user(&store, user_dto("carol"))
            .await
            .unwrap();

        let stored = store.get_user(created.id).await.unwrap();
        assert_eq!(stored.bio.as_deref(), Some("reads a lot"));
        assert_ne!(stored.hashed_password, "secret");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let store = InMemoryStore::new();
        UserService::create_user(&store, user_dto("carol"))
            .await
            .unwrap();
        let err = UserService::create_user(&store, user_dto("carol"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UsernameTaken);
    }

    #[tokio::test]
    async fn test_get_user_splits_sent_and_received() {
        let store = InMemoryStore::new();
        let carol = UserService::create_user(&store, user_dto("carol"))
            .await
            .unwrap();
        let dave = UserService::create_user(&store, user_dto("dave"))
            .await
            .unwrap();
        let carols_book = store
            .create_book(NewBook {
                title: "Ubik".to_string(),
                description: None,
                owner_id: carol.id,
            })
            .await
            .unwrap();
        let daves_book = store
            .create_book(NewBook {
                title: "Emma".to_string(),
                description: None,
                owner_id: dave.id,
            })
            .await
            .unwrap();
        store.create_exchange(carols_book.id, dave.id).await.unwrap();
        store.create_exchange(daves_book.id, carol.id).await.unwrap();

        let detail = UserService::get_user(&store, carol.id).await.unwrap();

        assert_eq!(detail.books.len(), 1);
        assert_eq!(detail.books[0].title, "Ubik");
        assert_eq!(detail.sent_requests.len(), 1);
        assert_eq!(detail.sent_requests[0].book.title, "Emma");
        assert_eq!(detail.received_requests.len(), 1);
        assert_eq!(detail.received_requests[0].requester.username, "dave");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = InMemoryStore::new();
        let err = UserService::get_user(&store, 5).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
