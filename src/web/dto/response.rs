//! Response DTOs for the Web API.
//!
//! Storage timestamps (`YYYY-MM-DD HH:MM:SS` UTC) are converted to RFC3339
//! at this boundary. Password hashes never appear in any response type.

use serde::Serialize;

use crate::board::{Post, PostSummary};
use crate::datetime::to_rfc3339;
use crate::db::Account;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items matching the filter.
    pub total: i64,
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// ID of the created account.
    pub id: i64,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (JWT).
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Account snapshot.
    pub user: UserInfo,
}

/// Account information in responses (login and `/me`).
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub nickname: String,
    /// Email address.
    pub email: String,
    /// Whether an admin has approved this account.
    pub is_approved: bool,
    /// Whether this account holds admin rights.
    pub is_admin: bool,
}

impl From<Account> for UserInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            nickname: account.nickname,
            email: account.email,
            is_approved: account.is_approved,
            is_admin: account.is_admin,
        }
    }
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Full post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Board the post belongs to.
    pub board: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Author account ID, if any.
    pub author_id: Option<i64>,
    /// Author display name snapshot taken at creation time.
    pub author_name: Option<String>,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
    /// Last update timestamp (RFC3339).
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            board: post.board,
            title: post.title,
            body: post.body,
            author_id: post.author_id,
            author_name: post.author_name,
            created_at: to_rfc3339(&post.created_at),
            updated_at: to_rfc3339(&post.updated_at),
        }
    }
}

/// Post list row. Omits the body.
#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    /// Post ID.
    pub id: i64,
    /// Board the post belongs to.
    pub board: String,
    /// Post title.
    pub title: String,
    /// Author account ID, if any.
    pub author_id: Option<i64>,
    /// Author display name snapshot taken at creation time.
    pub author_name: Option<String>,
    /// Creation timestamp (RFC3339).
    pub created_at: String,
    /// Last update timestamp (RFC3339).
    pub updated_at: String,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.id,
            board: post.board,
            title: post.title,
            author_id: post.author_id,
            author_name: post.author_name,
            created_at: to_rfc3339(&post.created_at),
            updated_at: to_rfc3339(&post.updated_at),
        }
    }
}

/// Post creation response.
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    /// ID of the created post.
    pub id: i64,
}

// ============================================================================
// Admin DTOs
// ============================================================================

/// Account row in the admin directory.
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub nickname: String,
    /// Email address.
    pub email: String,
    /// Whether an admin has approved this account.
    pub is_approved: bool,
    /// Whether this account holds admin rights.
    pub is_admin: bool,
    /// Account creation timestamp (RFC3339).
    pub created_at: String,
}

impl From<Account> for AdminUserResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            nickname: account.nickname,
            email: account.email,
            is_approved: account.is_approved,
            is_admin: account.is_admin,
            created_at: to_rfc3339(&account.created_at),
        }
    }
}
