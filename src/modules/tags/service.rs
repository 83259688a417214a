use tracing::instrument;

use bookswap_core::AppError;
use bookswap_db::Store;
use bookswap_models::{BookId, BookTagLink, CreateTagDto, Tag, TagId};

pub struct TagService;

impl TagService {
    #[instrument(skip(store))]
    pub async fn create_tag(store: &dyn Store, dto: CreateTagDto) -> Result<Tag, AppError> {
        let tag = store.create_tag(&dto.name).await?;
        Ok(tag)
    }

    pub async fn list_tags(store: &dyn Store) -> Result<Vec<Tag>, AppError> {
        Ok(store.list_tags().await?)
    }

    /// Links `tag_id` to `book_id`. Linking an already linked pair succeeds
    /// without writing anything and returns the original link.
    #[instrument(skip(store))]
    pub async fn attach_tag(
        store: &dyn Store,
        book_id: BookId,
        tag_id: TagId,
    ) -> Result<BookTagLink, AppError> {
        let (link, created) = store.attach_tag(book_id, tag_id).await?;
        if !created {
            tracing::debug!(added_at = %link.added_at, "Tag already attached");
        }
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookswap_core::ErrorKind;
    use bookswap_db::InMemoryStore;
    use bookswap_models::{NewBook, NewUser};

    async fn seed_book(store: &InMemoryStore) -> BookId {
        let owner = store
            .create_user(NewUser {
                username: "owner".to_string(),
                hashed_password: "x".to_string(),
                bio: None,
                preferences: None,
            })
            .await
            .unwrap();
        store
            .create_book(NewBook {
                title: "Dune".to_string(),
                description: None,
                owner_id: owner.id,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_duplicate_tag_name_is_rejected() {
        let store = InMemoryStore::new();
        TagService::create_tag(&store, CreateTagDto { name: "scifi".into() })
            .await
            .unwrap();

        let err = TagService::create_tag(&store, CreateTagDto { name: "scifi".into() })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_attach_twice_keeps_one_link() {
        let store = InMemoryStore::new();
        let book_id = seed_book(&store).await;
        let tag = TagService::create_tag(&store, CreateTagDto { name: "scifi".into() })
            .await
            .unwrap();

        let first = TagService::attach_tag(&store, book_id, tag.id).await.unwrap();
        let second = TagService::attach_tag(&store, book_id, tag.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!((first.book_id, first.tag_id), (book_id, tag.id));
        assert_eq!(store.link_count(), 1);
    }

    #[tokio::test]
    async fn test_attach_to_missing_book_is_not_found() {
        let store = InMemoryStore::new();
        let tag = TagService::create_tag(&store, CreateTagDto { name: "scifi".into() })
            .await
            .unwrap();

        let err = TagService::attach_tag(&store, 404, tag.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(store.link_count(), 0);
    }
}
