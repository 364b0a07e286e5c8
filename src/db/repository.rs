//! Account repository for Agora.
//!
//! This module provides CRUD operations for accounts in the database. All
//! statements are parameterized; user input never reaches a statement as raw
//! SQL text.

use sqlx::QueryBuilder;

use super::account::{Account, AccountFilter, NewAccount};
use crate::db::DbPool;
use crate::{AgoraError, Result};

/// Repository for account records.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account in the database.
    ///
    /// Returns the created account with the assigned ID.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let result = sqlx::query(
            "INSERT INTO users (username, nickname, password_hash, email, is_approved, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&new_account.username)
        .bind(&new_account.nickname)
        .bind(&new_account.password_hash)
        .bind(&new_account.email)
        .bind(new_account.is_approved)
        .bind(new_account.is_admin)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AgoraError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, username, nickname, password_hash, email, is_approved, is_admin, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get an account by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let result = sqlx::query_as::<_, Account>(
            "SELECT id, username, nickname, password_hash, email, is_approved, is_admin, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Check whether a username or email is already taken.
    ///
    /// Registration reports both collisions identically, so a single query
    /// covers both columns.
    pub async fn username_or_email_exists(&self, username: &str, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Check whether any admin account exists.
    pub async fn admin_exists(&self) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE is_admin = 1)")
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// List accounts for the admin directory, newest first.
    pub async fn list(
        &self,
        filter: &AccountFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Account>> {
        let mut builder = QueryBuilder::new(
            "SELECT id, username, nickname, password_hash, email, is_approved, is_admin, created_at
             FROM users WHERE 1=1",
        );
        Self::push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let accounts = builder
            .build_query_as::<Account>()
            .fetch_all(self.pool)
            .await?;

        Ok(accounts)
    }

    /// Count accounts matching the directory filter.
    pub async fn count(&self, filter: &AccountFilter) -> Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");
        Self::push_filter(&mut builder, filter);

        let total: i64 = builder.build_query_scalar().fetch_one(self.pool).await?;

        Ok(total)
    }

    /// Set the approval flag on an account.
    ///
    /// Returns false if no account with the given ID exists.
    pub async fn set_approval(&self, id: i64, approved: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_approved = $1 WHERE id = $2")
            .bind(approved)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append the directory filter conditions to a query.
    fn push_filter(builder: &mut QueryBuilder<'_, sqlx::Sqlite>, filter: &AccountFilter) {
        if let Some(approved) = filter.approved {
            builder.push(" AND is_approved = ").push_bind(approved);
        }
        if let Some(query) = &filter.query {
            let pattern = format!("%{query}%");
            builder
                .push(" AND (username LIKE ")
                .push_bind(pattern.clone())
                .push(" OR nickname LIKE ")
                .push_bind(pattern.clone())
                .push(" OR email LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}
