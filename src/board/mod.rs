//! Board module for Agora.
//!
//! This module provides the bulletin board functionality:
//! - The fixed set of boards (notice, game, free)
//! - Post models with a denormalized author name snapshot
//! - Post CRUD, substring search, and soft deletion

mod repository;
mod types;

pub use repository::PostRepository;
pub use types::{Board, NewPost, Post, PostSummary};
