//! Board and post models.
//!
//! Boards are a fixed set; posts belong to exactly one board and carry a
//! denormalized author name snapshot taken at creation time.

use std::fmt;
use std::str::FromStr;

/// The fixed set of discussion boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    /// Announcements; only admins may post.
    Notice,
    /// Game discussion.
    Game,
    /// Off-topic discussion.
    Free,
}

impl Board {
    /// Convert the board to its database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Notice => "notice",
            Board::Game => "game",
            Board::Free => "free",
        }
    }

    /// Get the display name for the board.
    pub fn display_name(&self) -> &'static str {
        match self {
            Board::Notice => "공지사항",
            Board::Game => "게임게시판",
            Board::Free => "자유게시판",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notice" => Ok(Board::Notice),
            "game" => Ok(Board::Game),
            "free" => Ok(Board::Free),
            _ => Err(format!("unknown board: {s}")),
        }
    }
}

/// Post entity representing a message on a board.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Board the post belongs to.
    pub board: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// ID of the authoring account, if any.
    pub author_id: Option<i64>,
    /// Author display name snapshot taken at creation time.
    pub author_name: Option<String>,
    /// Creation timestamp (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
    /// Last update timestamp (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub updated_at: String,
    /// Soft-delete flag; deleted posts are excluded from all reads.
    pub is_deleted: bool,
}

/// Post listing row. The body is omitted from list projections.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostSummary {
    /// Unique post ID.
    pub id: i64,
    /// Board the post belongs to.
    pub board: String,
    /// Post title.
    pub title: String,
    /// ID of the authoring account, if any.
    pub author_id: Option<i64>,
    /// Author display name snapshot.
    pub author_name: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Target board.
    pub board: Board,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Authoring account ID.
    pub author_id: Option<i64>,
    /// Author display name snapshot.
    pub author_name: Option<String>,
}

impl NewPost {
    /// Create a new post with the required fields and no author.
    pub fn new(board: Board, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            board,
            title: title.into(),
            body: body.into(),
            author_id: None,
            author_name: None,
        }
    }

    /// Set the authoring identity snapshot.
    pub fn with_author(mut self, author_id: i64, author_name: impl Into<String>) -> Self {
        self.author_id = Some(author_id);
        self.author_name = Some(author_name.into());
        self
    }
}
