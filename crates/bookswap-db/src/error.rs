use bookswap_core::{AppError, ErrorKind};
use bookswap_models::{RequestStatus, UserId};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Tag '{0}' already exists")]
    TagNameTaken(String),

    #[error("Cannot change exchange request status from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("User {0} cannot request an exchange of their own book")]
    SelfExchange(UserId),

    #[error("Database failure: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failure: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::not_found(err),
            StoreError::UsernameTaken(_) => AppError::new(ErrorKind::UsernameTaken, err),
            StoreError::TagNameTaken(_) => AppError::already_exists(err),
            StoreError::InvalidTransition { .. } => AppError::invalid_transition(err),
            StoreError::SelfExchange(_) => AppError::bad_request(err),
            StoreError::Database(_) | StoreError::Migration(_) => AppError::database(err),
        }
    }
}
