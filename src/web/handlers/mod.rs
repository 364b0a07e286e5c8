//! API handlers for the Web API.

pub mod admin;
pub mod auth;
pub mod posts;

pub use admin::*;
pub use auth::*;
pub use posts::*;
