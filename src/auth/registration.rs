//! Account registration.
//!
//! New accounts start unapproved and without admin rights; an admin must
//! approve them through the directory before the account is considered
//! a full member.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_registration, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{Account, AccountRepository, NewAccount};

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Username or email is already taken.
    #[error("username or email already in use")]
    DuplicateIdentity,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (3-30 characters).
    pub username: String,
    /// Display nickname (1-60 characters).
    pub nickname: String,
    /// Password (6-128 characters).
    pub password: String,
    /// Email address.
    pub email: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        username: impl Into<String>,
        nickname: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            nickname: nickname.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}

/// Register a new account.
///
/// This function:
/// 1. Validates all identity fields
/// 2. Checks that neither the username nor the email is taken
/// 3. Hashes the password
/// 4. Creates the account (unapproved, non-admin)
///
/// # Examples
///
/// ```ignore
/// use agora::auth::registration::{register, RegistrationRequest};
/// use agora::db::{AccountRepository, Database};
///
/// let db = Database::open_in_memory().await?;
/// let repo = AccountRepository::new(db.pool());
///
/// let request = RegistrationRequest::new("john_doe", "John", "password123", "john@example.com");
/// let account = register(&repo, request).await?;
/// println!("Registered account: {}", account.username);
/// ```
pub async fn register(
    repo: &AccountRepository<'_>,
    request: RegistrationRequest,
) -> std::result::Result<Account, RegistrationError> {
    // 1. Validate identity fields
    validate_registration(&request.username, &request.nickname, &request.email)?;

    // 2. Check if the username or email is already taken
    if repo
        .username_or_email_exists(&request.username, &request.email)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::DuplicateIdentity);
    }

    // 3. Hash the password (also enforces password length rules)
    let password_hash = hash_password(&request.password)?;

    // 4. Create the account
    let new_account = NewAccount::new(
        &request.username,
        &request.nickname,
        &password_hash,
        &request.email,
    );

    let account = create_checked(repo, &new_account).await?;

    info!(
        username = %account.username,
        user_id = account.id,
        "New account registered"
    );

    Ok(account)
}

/// Register an account with admin rights, already approved.
///
/// This is used for creating the initial admin account at startup.
pub async fn register_admin(
    repo: &AccountRepository<'_>,
    request: RegistrationRequest,
) -> std::result::Result<Account, RegistrationError> {
    validate_registration(&request.username, &request.nickname, &request.email)?;

    if repo
        .username_or_email_exists(&request.username, &request.email)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::DuplicateIdentity);
    }

    let password_hash = hash_password(&request.password)?;

    let new_account = NewAccount::new(
        &request.username,
        &request.nickname,
        &password_hash,
        &request.email,
    )
    .with_approved(true)
    .with_admin(true);

    let account = create_checked(repo, &new_account).await?;

    info!(
        username = %account.username,
        user_id = account.id,
        "New admin account registered"
    );

    Ok(account)
}

/// Insert the account, folding a unique-constraint violation into
/// `DuplicateIdentity`.
///
/// The existence check above is not atomic with the insert; a concurrent
/// registration can still claim the username or email in between, in which
/// case the UNIQUE index rejects the insert.
async fn create_checked(
    repo: &AccountRepository<'_>,
    new_account: &NewAccount,
) -> std::result::Result<Account, RegistrationError> {
    match repo.create(new_account).await {
        Ok(account) => Ok(account),
        Err(e) => {
            let message = e.to_string();
            if message.contains("UNIQUE constraint failed") {
                Err(RegistrationError::DuplicateIdentity)
            } else {
                Err(RegistrationError::Database(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request =
            RegistrationRequest::new("testuser", "Test User", "password123", "test@example.com");
        let account = register(&repo, request).await.unwrap();

        assert_eq!(account.username, "testuser");
        assert_eq!(account.nickname, "Test User");
        assert_eq!(account.email, "test@example.com");
        assert!(!account.is_approved);
        assert!(!account.is_admin);
    }

    #[tokio::test]
    async fn test_register_minimal_fields() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        // Shortest valid username and password
        let request = RegistrationRequest::new("abc", "ABC", "secret1", "a@b.com");
        let account = register(&repo, request).await.unwrap();

        assert_eq!(account.username, "abc");
        assert_eq!(account.nickname, "ABC");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request1 =
            RegistrationRequest::new("testuser", "First", "password123", "first@example.com");
        register(&repo, request1).await.unwrap();

        let request2 =
            RegistrationRequest::new("testuser", "Second", "password456", "second@example.com");
        let result = register(&repo, request2).await;

        assert!(matches!(result, Err(RegistrationError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request1 =
            RegistrationRequest::new("firstuser", "First", "password123", "same@example.com");
        register(&repo, request1).await.unwrap();

        let request2 =
            RegistrationRequest::new("seconduser", "Second", "password456", "same@example.com");
        let result = register(&repo, request2).await;

        assert!(matches!(result, Err(RegistrationError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        // Too short
        let request = RegistrationRequest::new("ab", "Test", "password123", "test@example.com");
        let result = register(&repo, request).await;
        assert!(matches!(result, Err(RegistrationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_nickname() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request = RegistrationRequest::new("testuser", "", "password123", "test@example.com");
        let result = register(&repo, request).await;
        assert!(matches!(result, Err(RegistrationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request =
            RegistrationRequest::new("testuser", "Test User", "password123", "invalid-email");
        let result = register(&repo, request).await;
        assert!(matches!(result, Err(RegistrationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request = RegistrationRequest::new("testuser", "Test User", "12345", "t@example.com");
        let result = register(&repo, request).await;
        assert!(matches!(result, Err(RegistrationError::Password(_))));
    }

    #[tokio::test]
    async fn test_register_admin() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request =
            RegistrationRequest::new("boardadmin", "Admin", "password123", "admin@example.com");
        let account = register_admin(&repo, request).await.unwrap();

        assert!(account.is_approved);
        assert!(account.is_admin);
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let db = test_db().await;
        let repo = AccountRepository::new(db.pool());

        let request =
            RegistrationRequest::new("testuser", "Test User", "password123", "test@example.com");
        let account = register(&repo, request).await.unwrap();

        // Stored value must be a hash, not the plain text
        assert_ne!(account.password_hash, "password123");
        assert!(account.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_registration_request_builder() {
        let request = RegistrationRequest::new("user", "nick", "pass", "a@b.com");

        assert_eq!(request.username, "user");
        assert_eq!(request.nickname, "nick");
        assert_eq!(request.password, "pass");
        assert_eq!(request.email, "a@b.com");
    }

    #[test]
    fn test_registration_error_display() {
        let err = RegistrationError::DuplicateIdentity;
        assert!(err.to_string().contains("already in use"));

        let err = RegistrationError::Validation(ValidationError::UsernameTooShort);
        assert!(err.to_string().contains("validation"));
    }
}
