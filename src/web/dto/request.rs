//! Request DTOs for the Web API.
//!
//! Body DTOs carry `validator` rules and are extracted through
//! [`super::ValidatedJson`], so handlers only ever see well-formed input.

use serde::Deserialize;
use validator::Validate;

use super::validation::not_empty_trimmed;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (unique).
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,
    /// Display name.
    #[validate(length(min = 1, max = 60, message = "Nickname must be 1-60 characters"))]
    pub nickname: String,
    /// Password (plaintext; hashed server-side).
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
    /// Email address (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub title: String,
    /// Post body.
    #[validate(
        length(min = 1, max = 20000, message = "Body must be 1-20000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub body: String,
}

/// Post update request. Title and body are always replaced together.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New post title.
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub title: String,
    /// New post body.
    #[validate(
        length(min = 1, max = 20000, message = "Body must be 1-20000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub body: String,
}

/// Account approval request.
#[derive(Debug, Deserialize, Validate)]
pub struct ApprovalRequest {
    /// Target approval state. False revokes a previous approval.
    pub approve: bool,
}

/// Pagination query parameters.
///
/// Out-of-range values are clamped rather than rejected: any page below 1
/// becomes 1 and the limit is forced into `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationQuery {
    /// Requested page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Requested page size.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    /// Largest allowed page size.
    pub const MAX_LIMIT: i64 = 100;

    /// Effective page number, at least 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Effective page size, clamped to `1..=MAX_LIMIT`.
    pub fn per_page(&self) -> i64 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }

    /// Convert to a SQL `(offset, limit)` pair.
    pub fn to_offset_limit(&self) -> (i64, i64) {
        let limit = self.per_page();
        ((self.page() - 1).saturating_mul(limit), limit)
    }
}

/// Query parameters for post listings.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    /// Substring filter on title, body, and author name.
    pub q: Option<String>,
    /// Requested page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Requested page size.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl PostListQuery {
    /// Paging view of this query.
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Query parameters for the admin account directory.
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    /// Restrict to approved (true) or unapproved (false) accounts.
    pub approved: Option<bool>,
    /// Substring filter on username, nickname, and email.
    pub q: Option<String>,
    /// Requested page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Requested page size.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl AdminListQuery {
    /// Paging view of this query.
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
