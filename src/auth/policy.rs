//! Write authorization policy.
//!
//! Decides, per mutating operation, whether the requesting identity is
//! allowed: owner-or-admin for posts, admin-only for the notice board and
//! the account directory. Deny reasons are categorized for logging but the
//! HTTP layer reports them all as a single forbidden outcome.

use thiserror::Error;

use crate::auth::session::JwtClaims;
use crate::board::Board;

/// The authenticated, request-scoped identity of the caller.
///
/// Derived from verified token claims; never from anything the client
/// sent in the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account ID.
    pub subject_id: i64,
    /// Admin flag at token issuance time.
    pub is_admin: bool,
    /// Username at token issuance time.
    pub username: String,
    /// Display name, falling back to the username.
    pub nickname: String,
}

impl From<JwtClaims> for Identity {
    fn from(claims: JwtClaims) -> Self {
        let nickname = claims.display_name().to_string();
        Self {
            subject_id: claims.sub,
            is_admin: claims.is_admin,
            username: claims.username,
            nickname,
        }
    }
}

/// Policy denial reasons.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// No identity present. Policy checks fail closed when the
    /// authentication guard was not applied first.
    #[error("authentication required")]
    NotAuthenticated,

    /// Identity is neither the resource owner nor an admin.
    #[error("you can only modify your own posts")]
    NotOwner,

    /// Operation requires an admin identity.
    #[error("admin privileges required")]
    NotAdmin,

    /// The board only accepts posts from admins.
    #[error("only admins can post to this board")]
    BoardRestricted,
}

/// Check whether an identity may update or delete a post.
///
/// Allowed when the identity is an admin or when `owner_id` matches the
/// identity's subject. A post without an owner (`owner_id` is `None`)
/// matches no identity, so only admins may touch it.
///
/// # Examples
///
/// ```
/// use agora::auth::policy::{can_modify_post, Identity, PolicyError};
///
/// let owner = Identity {
///     subject_id: 1,
///     is_admin: false,
///     username: "john".to_string(),
///     nickname: "John".to_string(),
/// };
///
/// assert!(can_modify_post(Some(&owner), Some(1)).is_ok());
/// assert!(matches!(
///     can_modify_post(Some(&owner), Some(2)),
///     Err(PolicyError::NotOwner)
/// ));
/// ```
pub fn can_modify_post(
    identity: Option<&Identity>,
    owner_id: Option<i64>,
) -> Result<(), PolicyError> {
    let identity = identity.ok_or(PolicyError::NotAuthenticated)?;

    if identity.is_admin {
        return Ok(());
    }

    match owner_id {
        Some(owner_id) if owner_id == identity.subject_id => Ok(()),
        _ => Err(PolicyError::NotOwner),
    }
}

/// Check whether an identity may create a post on the given board.
///
/// The notice board is admin-only; the other boards accept any
/// authenticated identity.
pub fn can_post_to_board(identity: Option<&Identity>, board: Board) -> Result<(), PolicyError> {
    let identity = identity.ok_or(PolicyError::NotAuthenticated)?;

    if board == Board::Notice && !identity.is_admin {
        return Err(PolicyError::BoardRestricted);
    }

    Ok(())
}

/// Require an admin identity.
///
/// Used for the account directory and approval operations, where ownership
/// never substitutes for the admin flag.
///
/// # Examples
///
/// ```
/// use agora::auth::policy::{require_admin, PolicyError};
///
/// assert!(matches!(
///     require_admin(None),
///     Err(PolicyError::NotAuthenticated)
/// ));
/// ```
pub fn require_admin(identity: Option<&Identity>) -> Result<(), PolicyError> {
    match identity {
        Some(identity) if identity.is_admin => Ok(()),
        Some(_) => Err(PolicyError::NotAdmin),
        None => Err(PolicyError::NotAuthenticated),
    }
}
