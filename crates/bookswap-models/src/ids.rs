//! Entity id aliases.
//!
//! Ids are database-assigned `BIGSERIAL` values starting at 1.

pub type UserId = i64;
pub type BookId = i64;
pub type TagId = i64;
pub type ExchangeRequestId = i64;
pub type WarriorId = i64;
