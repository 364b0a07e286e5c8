//! Database schema and migrations for Agora.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Account records for registration, login and the admin directory
CREATE TABLE users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    nickname      TEXT NOT NULL,
    password_hash TEXT NOT NULL,          -- Argon2 hash
    email         TEXT NOT NULL UNIQUE,
    is_approved   INTEGER NOT NULL DEFAULT 0,
    is_admin      INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_created_at ON users(created_at);
"#,
    // v2: Posts table for the fixed discussion boards
    r#"
-- Posts for the fixed discussion boards ('notice', 'game', 'free').
-- author_id is a weak back-reference: rows outlive account changes and
-- author_name keeps the display name as it was at creation time.
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    board       TEXT NOT NULL,
    title       TEXT NOT NULL,
    body        TEXT NOT NULL,
    author_id   INTEGER REFERENCES users(id),
    author_name TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now')),
    is_deleted  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_posts_board_listing ON posts(board, is_deleted, created_at);
CREATE INDEX idx_posts_author_id ON posts(author_id);
"#,
];
