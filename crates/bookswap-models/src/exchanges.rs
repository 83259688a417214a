//! Exchange requests and their status state machine.
//!
//! A request starts as [`RequestStatus::Pending`] and may move once, to either
//! [`RequestStatus::Accepted`] or [`RequestStatus::Rejected`]. Both are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::books::BookRead;
use crate::ids::{BookId, ExchangeRequestId, UserId};
use crate::users::UserRead;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "exchange_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Accepted)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `owner_id` is copied from the book when the request is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExchangeRequest {
    pub id: ExchangeRequestId,
    pub book_id: BookId,
    pub requester_id: UserId,
    pub owner_id: UserId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateExchangeDto {
    pub book_id: BookId,
    pub requester_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateExchangeStatusDto {
    pub status: RequestStatus,
}

/// Exchange request with book, requester and owner resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRequestRead {
    pub id: ExchangeRequestId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub book: BookRead,
    pub requester: UserRead,
    pub owner: UserRead,
}
