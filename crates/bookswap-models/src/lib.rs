//! # Bookswap Models
//!
//! Entities, request DTOs and read models for the Bookswap API.
//!
//! Entities ([`User`], [`Book`], [`Tag`], [`BookTagLink`], [`ExchangeRequest`])
//! mirror the relational tables and hold foreign keys as plain ids. Read models
//! ([`BookRead`], [`ExchangeRequestRead`], [`UserDetail`]) are assembled by the
//! services from those ids; entities never reference each other directly.
//!
//! - [`auth`]: registration, login and password change payloads
//! - [`books`]: books and their read model
//! - [`common`]: error and status response bodies
//! - [`exchanges`]: exchange requests and the status state machine
//! - [`ids`]: id aliases
//! - [`tags`]: tags and book/tag links
//! - [`users`]: users, public projections and the detail view
//! - [`warriors`]: the warriors list resource

pub mod auth;
pub mod books;
pub mod common;
pub mod exchanges;
pub mod ids;
pub mod tags;
pub mod users;
pub mod warriors;

pub use auth::{ChangePasswordRequest, LoginRequest, RegisterRequest, TokenResponse};
pub use books::{Book, BookRead, CreateBookDto, NewBook};
pub use common::{ErrorResponse, HealthResponse, StatusMessageResponse};
pub use exchanges::{
    CreateExchangeDto, ExchangeRequest, ExchangeRequestRead, RequestStatus,
    UpdateExchangeStatusDto,
};
pub use ids::{BookId, ExchangeRequestId, TagId, UserId, WarriorId};
pub use tags::{BookTagLink, CreateTagDto, Tag};
pub use users::{CreateUserDto, NewUser, User, UserDetail, UserRead};
pub use warriors::{Achievement, Race, Warrior, WarriorBook, WarriorCreatedResponse};
