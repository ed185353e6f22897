//! Route groups mounted by the HTTP application.

pub mod health;
pub mod users;
