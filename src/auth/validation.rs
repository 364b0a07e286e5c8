//! Identity field validation for registration.
//!
//! Usernames, nicknames, and emails are checked here; password rules live
//! in [`super::password`]. Lengths count characters rather than bytes so
//! Korean names get the full advertised range.

use thiserror::Error;

/// Minimum username length in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Maximum nickname length in characters.
pub const MAX_NICKNAME_LENGTH: usize = 60;

/// Maximum email length in bytes, per RFC 5321's practical limit.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Rejection reasons for identity fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    #[error("nickname must not be empty")]
    NicknameEmpty,

    #[error("nickname must be at most {MAX_NICKNAME_LENGTH} characters")]
    NicknameTooLong,

    #[error("nickname must not contain control characters")]
    NicknameInvalidChars,

    #[error("email must not be empty")]
    EmailEmpty,

    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    #[error("email address is not valid")]
    EmailInvalidFormat,
}

/// Check a username against the length window.
///
/// # Examples
///
/// ```
/// use agora::auth::validation::validate_username;
///
/// assert!(validate_username("kim").is_ok());
/// assert!(validate_username("ab").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    match username.chars().count() {
        n if n < MIN_USERNAME_LENGTH => Err(ValidationError::UsernameTooShort),
        n if n > MAX_USERNAME_LENGTH => Err(ValidationError::UsernameTooLong),
        _ => Ok(()),
    }
}

/// Check a nickname: non-empty, within length, no control characters.
///
/// # Examples
///
/// ```
/// use agora::auth::validation::validate_nickname;
///
/// assert!(validate_nickname("홍길동").is_ok());
/// assert!(validate_nickname("").is_err());
/// ```
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    if nickname.is_empty() {
        return Err(ValidationError::NicknameEmpty);
    }
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(ValidationError::NicknameTooLong);
    }
    if nickname.chars().any(char::is_control) {
        return Err(ValidationError::NicknameInvalidChars);
    }
    Ok(())
}

/// Check the rough shape of an email address.
///
/// Accepts exactly one `@` with a non-empty local part and a dotted domain
/// whose labels are all non-empty. Full RFC 5322 parsing is out of scope;
/// addresses this check passes still only matter if mail actually arrives.
///
/// # Examples
///
/// ```
/// use agora::auth::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("not-an-address").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::EmailInvalidFormat);
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Run all identity checks, stopping at the first failure.
///
/// Field order is username, nickname, email. Passwords are checked
/// separately when hashed.
pub fn validate_registration(
    username: &str,
    nickname: &str,
    email: &str,
) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_nickname(nickname)?;
    validate_email(email)?;
    Ok(())
}
