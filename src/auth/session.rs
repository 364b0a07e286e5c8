//! Session issuance.
//!
//! Sessions are stateless: login verifies the stored credentials and mints
//! a signed JWT carrying the identity claims. Nothing is persisted, so a
//! token stays valid until its expiry even if the account changes later.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::verify_password;
use crate::db::{Account, AccountRepository};

/// Session token lifetime: 7 days.
pub const SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid credentials (wrong username or password).
    ///
    /// Deliberately a single variant for both cases so callers cannot
    /// tell an unknown username from a wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No signing secret is configured.
    #[error("signing secret is not configured")]
    MissingSecret,

    /// Token encoding failed.
    #[error("failed to encode session token: {0}")]
    TokenEncoding(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (account ID).
    pub sub: i64,
    /// Admin flag at issuance time.
    pub is_admin: bool,
    /// Username at issuance time.
    pub username: String,
    /// Nickname at issuance time. Absent claims fall back to the username.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Issued at timestamp (seconds since epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: u64,
}

impl JwtClaims {
    /// The display name for this claim, falling back to the username
    /// when no nickname was recorded.
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => &self.username,
        }
    }
}

/// Issues signed session tokens after verifying credentials.
#[derive(Clone)]
pub struct SessionIssuer {
    /// Encoding key derived from the configured secret.
    encoding_key: EncodingKey,
}

impl SessionIssuer {
    /// Create a new issuer from the configured secret.
    ///
    /// Fails with [`SessionError::MissingSecret`] when the secret is empty;
    /// tokens must never be signed with a default key.
    pub fn new(secret: &str) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Verify credentials and mint a session token.
    ///
    /// Returns the signed token together with the account snapshot so the
    /// caller can include the profile in its response. Unknown usernames
    /// and wrong passwords both produce `InvalidCredentials`.
    pub async fn issue(
        &self,
        repo: &AccountRepository<'_>,
        username: &str,
        password: &str,
    ) -> Result<(String, Account), SessionError> {
        let account = repo
            .get_by_username(username)
            .await
            .map_err(|e| SessionError::Database(e.to_string()))?;

        let account = match account {
            Some(account) => account,
            None => {
                warn!(username = %username, "Login failed: unknown username");
                return Err(SessionError::InvalidCredentials);
            }
        };

        if verify_password(password, &account.password_hash).is_err() {
            warn!(username = %username, "Login failed: wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        let token = self.mint(&account)?;

        info!(
            username = %account.username,
            user_id = account.id,
            "Login successful"
        );

        Ok((token, account))
    }

    /// Sign a token for an already-verified account.
    fn mint(&self, account: &Account) -> Result<String, SessionError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: account.id,
            is_admin: account.is_admin,
            username: account.username.clone(),
            nickname: Some(account.nickname.clone()),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            SessionError::TokenEncoding(e.to_string())
        })
    }
}
