//! Post repository.
//!
//! CRUD and paginated search over posts, always scoped by board. Reads
//! exclude soft-deleted rows, and the mutating statements target
//! non-deleted rows only, so an already-deleted post reports as absent.

use sqlx::QueryBuilder;

use super::types::{Board, NewPost, Post, PostSummary};
use crate::db::DbPool;
use crate::{AgoraError, Result};

/// Repository for post records.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query(
            "INSERT INTO posts (board, title, body, author_id, author_name)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(new_post.board.as_str())
        .bind(&new_post.title)
        .bind(&new_post.body)
        .bind(new_post.author_id)
        .bind(&new_post.author_name)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(new_post.board, id)
            .await?
            .ok_or_else(|| AgoraError::NotFound("post".to_string()))
    }

    /// Get a post by board and ID, excluding soft-deleted posts.
    pub async fn get(&self, board: Board, id: i64) -> Result<Option<Post>> {
        let result = sqlx::query_as::<_, Post>(
            "SELECT id, board, title, body, author_id, author_name, created_at, updated_at, is_deleted
             FROM posts WHERE id = $1 AND board = $2 AND is_deleted = 0",
        )
        .bind(id)
        .bind(board.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// List posts on a board, newest first.
    ///
    /// The optional query matches title, body, and author name as a
    /// substring. List rows omit the post body.
    pub async fn list(
        &self,
        board: Board,
        query: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        let mut builder = QueryBuilder::new(
            "SELECT id, board, title, author_id, author_name, created_at, updated_at
             FROM posts WHERE board = ",
        );
        builder.push_bind(board.as_str());
        builder.push(" AND is_deleted = 0");
        Self::push_search(&mut builder, query);
        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let posts = builder
            .build_query_as::<PostSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok(posts)
    }

    /// Count posts on a board matching the optional query.
    pub async fn count(&self, board: Board, query: Option<&str>) -> Result<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts WHERE board = ");
        builder.push_bind(board.as_str());
        builder.push(" AND is_deleted = 0");
        Self::push_search(&mut builder, query);

        let total: i64 = builder.build_query_scalar().fetch_one(self.pool).await?;

        Ok(total)
    }

    /// Update the title and body of a post, refreshing `updated_at`.
    ///
    /// Returns the updated post, or None when the post does not exist on
    /// this board or is already soft-deleted.
    pub async fn update(
        &self,
        board: Board,
        id: i64,
        title: &str,
        body: &str,
    ) -> Result<Option<Post>> {
        let result = sqlx::query(
            "UPDATE posts SET title = $1, body = $2, updated_at = datetime('now')
             WHERE id = $3 AND board = $4 AND is_deleted = 0",
        )
        .bind(title)
        .bind(body)
        .bind(id)
        .bind(board.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(board, id).await
    }

    /// Soft-delete a post.
    ///
    /// Returns false when the post does not exist on this board or is
    /// already soft-deleted. There is no restore operation.
    pub async fn soft_delete(&self, board: Board, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE posts SET is_deleted = 1 WHERE id = $1 AND board = $2 AND is_deleted = 0",
        )
        .bind(id)
        .bind(board.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append the substring search condition to a query.
    fn push_search(builder: &mut QueryBuilder<'_, sqlx::Sqlite>, query: Option<&str>) {
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let pattern = format!("%{query}%");
            builder
                .push(" AND (title LIKE ")
                .push_bind(pattern.clone())
                .push(" OR body LIKE ")
                .push_bind(pattern.clone())
                .push(" OR author_name LIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn post(board: Board, n: u32) -> NewPost {
        NewPost::new(board, format!("Title {n}"), format!("Body {n}")).with_author(1, "Tester")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo
            .create(&NewPost::new(Board::Free, "Hello", "World").with_author(7, "John"))
            .await
            .unwrap();

        assert_eq!(created.board, "free");
        assert_eq!(created.title, "Hello");
        assert_eq!(created.body, "World");
        assert_eq!(created.author_id, Some(7));
        assert_eq!(created.author_name, Some("John".to_string()));
        assert!(!created.is_deleted);
        assert!(!created.created_at.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get(Board::Free, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_without_author() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        // The column is nullable; an ownerless post matches no identity
        let created = repo
            .create(&NewPost::new(Board::Free, "No owner", "Body"))
            .await
            .unwrap();

        assert_eq!(created.author_id, None);
        assert_eq!(created.author_name, None);
    }

    #[tokio::test]
    async fn test_get_is_board_scoped() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Game, 1)).await.unwrap();

        // Probing the same ID through another board finds nothing
        assert!(repo.get(Board::Free, created.id).await.unwrap().is_none());
        assert!(repo.get(Board::Game, created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_excludes_deleted() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Free, 1)).await.unwrap();
        assert!(repo.soft_delete(Board::Free, created.id).await.unwrap());

        assert!(repo.get(Board::Free, created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        for n in 1..=3 {
            repo.create(&post(Board::Free, n)).await.unwrap();
        }

        let posts = repo.list(Board::Free, None, 0, 20).await.unwrap();

        assert_eq!(posts.len(), 3);
        // Rows created within the same second; id breaks the tie descending
        assert_eq!(posts[0].title, "Title 3");
        assert_eq!(posts[2].title, "Title 1");
    }

    #[tokio::test]
    async fn test_list_is_board_scoped() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        repo.create(&post(Board::Free, 1)).await.unwrap();
        repo.create(&post(Board::Game, 2)).await.unwrap();

        let free = repo.list(Board::Free, None, 0, 20).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].board, "free");

        let notice = repo.list(Board::Notice, None, 0, 20).await.unwrap();
        assert!(notice.is_empty());
    }

    #[tokio::test]
    async fn test_list_excludes_deleted() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let keep = repo.create(&post(Board::Free, 1)).await.unwrap();
        let gone = repo.create(&post(Board::Free, 2)).await.unwrap();
        repo.soft_delete(Board::Free, gone.id).await.unwrap();

        let posts = repo.list(Board::Free, None, 0, 20).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_list_search() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        repo.create(
            &NewPost::new(Board::Game, "elden ring builds", "discussion").with_author(1, "alice"),
        )
        .await
        .unwrap();
        repo.create(&NewPost::new(Board::Game, "patch notes", "elden nerfs").with_author(2, "bob"))
            .await
            .unwrap();
        repo.create(&NewPost::new(Board::Game, "hello", "world").with_author(3, "carol"))
            .await
            .unwrap();

        // Title match, case-insensitive for ASCII
        let by_title = repo
            .list(Board::Game, Some("ELDEN RING"), 0, 20)
            .await
            .unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "elden ring builds");

        // Body matches too
        let by_body = repo.list(Board::Game, Some("elden"), 0, 20).await.unwrap();
        assert_eq!(by_body.len(), 2);

        // Author name match
        let by_author = repo.list(Board::Game, Some("carol"), 0, 20).await.unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "hello");

        // Empty query means no filter
        let all = repo.list(Board::Game, Some(""), 0, 20).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        for n in 1..=5 {
            repo.create(&post(Board::Free, n)).await.unwrap();
        }

        let page1 = repo.list(Board::Free, None, 0, 2).await.unwrap();
        assert_eq!(page1.len(), 2);
        assert_eq!(page1[0].title, "Title 5");
        assert_eq!(page1[1].title, "Title 4");

        let page2 = repo.list(Board::Free, None, 2, 2).await.unwrap();
        assert_eq!(page2.len(), 2);
        assert_eq!(page2[0].title, "Title 3");

        let page3 = repo.list(Board::Free, None, 4, 2).await.unwrap();
        assert_eq!(page3.len(), 1);
    }

    #[tokio::test]
    async fn test_count() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        for n in 1..=5 {
            repo.create(&post(Board::Free, n)).await.unwrap();
        }
        let deleted = repo.create(&post(Board::Free, 6)).await.unwrap();
        repo.soft_delete(Board::Free, deleted.id).await.unwrap();

        // Count reflects the filtered total, independent of paging
        assert_eq!(repo.count(Board::Free, None).await.unwrap(), 5);
        assert_eq!(repo.count(Board::Free, Some("Title 3")).await.unwrap(), 1);
        assert_eq!(repo.count(Board::Game, None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Free, 1)).await.unwrap();

        let updated = repo
            .update(Board::Free, created.id, "New title", "New body")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.body, "New body");
        // The author snapshot is untouched by edits
        assert_eq!(updated.author_name, created.author_name);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Free, 1)).await.unwrap();

        // Storage timestamps have one-second resolution
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let updated = repo
            .update(Board::Free, created.id, "New title", "New body")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_ne!(updated.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_or_deleted() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        assert!(repo
            .update(Board::Free, 999, "t", "b")
            .await
            .unwrap()
            .is_none());

        let created = repo.create(&post(Board::Free, 1)).await.unwrap();
        repo.soft_delete(Board::Free, created.id).await.unwrap();

        // A soft-deleted post is not updatable
        assert!(repo
            .update(Board::Free, created.id, "t", "b")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_is_board_scoped() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Game, 1)).await.unwrap();

        assert!(repo
            .update(Board::Free, created.id, "t", "b")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_soft_delete() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let created = repo.create(&post(Board::Free, 1)).await.unwrap();

        assert!(repo.soft_delete(Board::Free, created.id).await.unwrap());
        // Deleting again reports absent
        assert!(!repo.soft_delete(Board::Free, created.id).await.unwrap());
        // Unknown id
        assert!(!repo.soft_delete(Board::Free, 999).await.unwrap());
    }
}
