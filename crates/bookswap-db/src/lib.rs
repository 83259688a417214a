//! # Bookswap DB
//!
//! The entity store behind the Bookswap API: users, books, tags, book/tag
//! links and exchange requests, plus the referential rules between them.
//!
//! [`Store`] is the seam the services depend on. Two backends implement it:
//!
//! - [`PgStore`]: PostgreSQL through a `sqlx` pool; operations touching more
//!   than one row run inside a single transaction
//! - [`InMemoryStore`]: `parking_lot` locked tables, used by tests and when no
//!   database is configured
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookswap_db::{InMemoryStore, PgStore, Store, init_db_pool};
//!
//! let store: Arc<dyn Store> = match std::env::var("DATABASE_URL") {
//!     Ok(url) => Arc::new(PgStore::connect(&url).await?),
//!     Err(_) => Arc::new(InMemoryStore::default()),
//! };
//! ```

mod error;
mod memory;
mod postgres;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use postgres::{PgStore, init_db_pool, run_migrations};
pub use store::Store;

pub use sqlx::PgPool;
