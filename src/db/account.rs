//! Account model for Agora.
//!
//! This module defines the Account struct and the builder types used by the
//! account repository.

/// Account entity representing a registered user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Display name.
    pub nickname: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Email address (unique).
    pub email: String,
    /// Whether an admin has approved this account.
    pub is_approved: bool,
    /// Whether this account holds admin rights.
    pub is_admin: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login username.
    pub username: String,
    /// Display name.
    pub nickname: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password_hash: String,
    /// Email address.
    pub email: String,
    /// Approval flag (defaults to false; toggled by admins).
    pub is_approved: bool,
    /// Admin flag (defaults to false).
    pub is_admin: bool,
}

impl NewAccount {
    /// Create a new account with the required registration fields.
    pub fn new(
        username: impl Into<String>,
        nickname: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            nickname: nickname.into(),
            password_hash: password_hash.into(),
            email: email.into(),
            is_approved: false,
            is_admin: false,
        }
    }

    /// Set the approval flag.
    pub fn with_approved(mut self, approved: bool) -> Self {
        self.is_approved = approved;
        self
    }

    /// Set the admin flag.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.is_admin = admin;
        self
    }
}

/// Filter for directory listings.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Restrict to approved (true) or unapproved (false) accounts.
    pub approved: Option<bool>,
    /// Substring match against username, nickname, or email.
    pub query: Option<String>,
}

impl AccountFilter {
    /// Create an empty filter matching all accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by approval state.
    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
        self
    }

    /// Restrict by search string.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}
