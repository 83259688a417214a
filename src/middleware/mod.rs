//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: bearer token authentication
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn me(AuthUser(user): AuthUser) -> Json<UserRead> {
//!     Json(user.to_read())
//! }
//! ```

pub mod auth;
