use std::fmt;
use std::sync::Arc;

use bookswap_config::{CorsConfig, JwtConfig};
use bookswap_db::{InMemoryStore, PgStore, Store};

use crate::modules::warriors::store::{InMemoryWarriorStore, WarriorStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub warriors: Arc<dyn WarriorStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            warriors: Arc::new(InMemoryWarriorStore::seeded()),
            jwt_config,
            cors_config,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            jwt_config,
            CorsConfig::default(),
        )
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_access_token_expiry", &self.jwt_config.access_token_expiry)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Builds the state from the environment.
///
/// `DATABASE_URL` selects the Postgres store; without it data lives in memory
/// and is lost on restart.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    let store: Arc<dyn Store> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => Arc::new(PgStore::connect(&database_url).await?),
        Err(_) => {
            tracing::warn!("DATABASE_URL is not set; using the in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    Ok(AppState::new(store, jwt_config, CorsConfig::from_env()))
}
