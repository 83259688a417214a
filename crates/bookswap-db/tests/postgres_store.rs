use bookswap_db::{PgStore, Store, StoreError};
use bookswap_models::{NewBook, NewUser, RequestStatus, User};
use sqlx::PgPool;

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        hashed_password: "$2b$04$hash".to_string(),
        bio: None,
        preferences: None,
    }
}

fn new_book(title: &str, owner_id: i64) -> NewBook {
    NewBook {
        title: title.to_string(),
        description: None,
        owner_id,
    }
}

async fn owner_and_requester(store: &PgStore) -> (User, User) {
    let owner = store.create_user(new_user("owner")).await.unwrap();
    let requester = store.create_user(new_user("requester")).await.unwrap();
    (owner, requester)
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_is_taken(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    store.create_user(new_user("alice")).await.unwrap();

    let result = store.create_user(new_user("alice")).await;

    assert!(matches!(result, Err(StoreError::UsernameTaken(name)) if name == "alice"));
    assert_eq!(count(&pool, "users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_user_by_username(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = store.create_user(new_user("alice")).await.unwrap();

    let found = store.find_user_by_username("alice").await.unwrap();
    assert_eq!(found, Some(alice));
    assert_eq!(store.find_user_by_username("bob").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_tag_name_is_taken(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    store.create_tag("scifi").await.unwrap();

    let result = store.create_tag("scifi").await;

    assert!(matches!(result, Err(StoreError::TagNameTaken(name)) if name == "scifi"));
    assert_eq!(count(&pool, "tags").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_book_with_missing_owner_is_not_found(pool: PgPool) {
    let store = PgStore::new(pool.clone());

    let result = store.create_book(new_book("1984", 42)).await;

    assert!(matches!(
        result,
        Err(StoreError::NotFound { entity: "User", id: 42 })
    ));
    assert_eq!(count(&pool, "books").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_twice_leaves_one_row(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (owner, _) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();
    let tag = store.create_tag("scifi").await.unwrap();

    let (first, created) = store.attach_tag(book.id, tag.id).await.unwrap();
    assert!(created);
    let (second, created) = store.attach_tag(book.id, tag.id).await.unwrap();
    assert!(!created);

    assert_eq!(second, first);
    assert_eq!(count(&pool, "book_tag_links").await, 1);
    let tags = store.tags_by_book(&[book.id]).await.unwrap();
    assert_eq!(tags, vec![(book.id, tag)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_to_missing_book_or_tag(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (owner, _) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();
    let tag = store.create_tag("scifi").await.unwrap();

    let result = store.attach_tag(999, tag.id).await;
    assert!(matches!(
        result,
        Err(StoreError::NotFound { entity: "Book", id: 999 })
    ));

    let result = store.attach_tag(book.id, 999).await;
    assert!(matches!(
        result,
        Err(StoreError::NotFound { entity: "Tag", id: 999 })
    ));
    assert_eq!(count(&pool, "book_tag_links").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exchange_snapshots_owner_and_starts_pending(pool: PgPool) {
    let store = PgStore::new(pool);
    let (owner, requester) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();

    let request = store.create_exchange(book.id, requester.id).await.unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.owner_id, owner.id);
    assert_eq!(request.requester_id, requester.id);
    assert_eq!(store.exchanges_for_user(owner.id).await.unwrap(), vec![request]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exchange_for_own_book_is_rejected(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (owner, _) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();

    let result = store.create_exchange(book.id, owner.id).await;

    assert!(matches!(result, Err(StoreError::SelfExchange(id)) if id == owner.id));
    assert_eq!(count(&pool, "exchange_requests").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_terminal_status_cannot_change(pool: PgPool) {
    let store = PgStore::new(pool);
    let (owner, requester) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();
    let request = store.create_exchange(book.id, requester.id).await.unwrap();

    let accepted = store
        .transition_exchange(request.id, RequestStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, RequestStatus::Accepted);

    let result = store
        .transition_exchange(request.id, RequestStatus::Rejected)
        .await;
    assert!(matches!(
        result,
        Err(StoreError::InvalidTransition {
            from: RequestStatus::Accepted,
            to: RequestStatus::Rejected,
        })
    ));

    let stored = store.get_exchange(request.id).await.unwrap();
    assert_eq!(stored.status, RequestStatus::Accepted);
    assert_eq!(stored.created_at, request.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transition_missing_exchange(pool: PgPool) {
    let store = PgStore::new(pool);

    let result = store.transition_exchange(7, RequestStatus::Accepted).await;

    assert!(matches!(
        result,
        Err(StoreError::NotFound {
            entity: "Exchange request",
            id: 7
        })
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_clear_restarts_ids(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (owner, requester) = owner_and_requester(&store).await;
    let book = store.create_book(new_book("Dune", owner.id)).await.unwrap();
    let tag = store.create_tag("scifi").await.unwrap();
    store.attach_tag(book.id, tag.id).await.unwrap();
    store.create_exchange(book.id, requester.id).await.unwrap();

    store.clear().await.unwrap();

    for table in ["users", "books", "tags", "book_tag_links", "exchange_requests"] {
        assert_eq!(count(&pool, table).await, 0, "{table} not cleared");
    }
    let user = store.create_user(new_user("fresh")).await.unwrap();
    assert_eq!(user.id, 1);
}
