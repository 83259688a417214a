pub mod auth;
pub mod books;
pub mod exchanges;
pub mod tags;
pub mod users;
pub mod warriors;
