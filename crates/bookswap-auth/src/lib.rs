//! # Bookswap Auth
//!
//! Stateless bearer tokens for the Bookswap API.
//!
//! - [`claims`]: the claim set embedded in an access token
//! - [`jwt`]: token creation and verification
//!
//! Tokens are HS256 JWTs carrying the username as subject and an absolute
//! expiry. They are never persisted; expiry is the only way a token stops
//! being valid.
//!
//! # Example
//!
//! ```ignore
//! use bookswap_auth::{create_access_token, verify_token};
//! use bookswap_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("alice", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, create_access_token_with_ttl, verify_token};
