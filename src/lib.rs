//! Agora - Community Bulletin Board Backend
//!
//! A small web backend for a member community: account registration
//! with admin approval, JWT session auth, and three fixed posting
//! boards served over a REST API.

pub mod admin;
pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use admin::ensure_initial_admin;
pub use auth::{
    can_modify_post, can_post_to_board, hash_password, register, register_admin, require_admin,
    validate_password, verify_password, Identity, JwtClaims, PasswordError, PolicyError,
    RegistrationError, RegistrationRequest, SessionError, SessionIssuer, ValidationError,
    SESSION_TTL_SECS,
};
pub use board::{Board, NewPost, Post, PostRepository, PostSummary};
pub use config::Config;
pub use db::{Account, AccountFilter, AccountRepository, Database, NewAccount};
pub use error::{AgoraError, Result};
pub use web::WebServer;
