//! Board post handlers.
//!
//! Reads are public; writes require a session token and go through the
//! board policy checks.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::{can_modify_post, can_post_to_board};
use crate::board::{Board, NewPost, PostRepository};
use crate::web::dto::{
    ApiResponse, CreatePostRequest, CreatePostResponse, PaginatedResponse, PostListQuery,
    PostResponse, PostSummaryResponse, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::auth::AppState;

/// Resolve a path segment into one of the fixed boards.
fn parse_board(board: &str) -> Result<Board, ApiError> {
    board.parse().map_err(|e: String| ApiError::bad_request(e))
}

/// GET /api/boards/:board/posts - List posts on a board, newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(board): Path<String>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<PaginatedResponse<PostSummaryResponse>>, ApiError> {
    let board = parse_board(&board)?;
    let paging = query.pagination();
    let (offset, limit) = paging.to_offset_limit();

    let repo = PostRepository::new(state.db.pool());
    let posts = repo.list(board, query.q.as_deref(), offset, limit).await?;
    let total = repo.count(board, query.q.as_deref()).await?;

    let data = posts.into_iter().map(PostSummaryResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        paging.page(),
        paging.per_page(),
        total,
    )))
}

/// GET /api/boards/:board/posts/:id - Fetch a single post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((board, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let board = parse_board(&board)?;

    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .get(board, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(ApiResponse::new(PostResponse::from(post))))
}

/// POST /api/boards/:board/posts - Create a post.
///
/// The notice board only accepts admins.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(board): Path<String>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatePostResponse>>), ApiError> {
    let board = parse_board(&board)?;
    can_post_to_board(Some(&identity), board)?;

    let new_post = NewPost::new(board, req.title, req.body)
        .with_author(identity.subject_id, identity.nickname.clone());

    let repo = PostRepository::new(state.db.pool());
    let post = repo.create(&new_post).await?;

    tracing::info!(
        post_id = post.id,
        board = %board,
        author = %identity.username,
        "Post created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CreatePostResponse { id: post.id })),
    ))
}

/// PUT /api/boards/:board/posts/:id - Edit a post's title and body.
///
/// Only the author or an admin may edit.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path((board, id)): Path<(String, i64)>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let board = parse_board(&board)?;

    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .get(board, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    can_modify_post(Some(&identity), post.author_id)?;

    let updated = repo
        .update(board, id, &req.title, &req.body)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(ApiResponse::new(PostResponse::from(updated))))
}

/// DELETE /api/boards/:board/posts/:id - Soft-delete a post.
///
/// Only the author or an admin may delete. The row is kept but hidden
/// from every read.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path((board, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let board = parse_board(&board)?;

    let repo = PostRepository::new(state.db.pool());
    let post = repo
        .get(board, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    can_modify_post(Some(&identity), post.author_id)?;

    if !repo.soft_delete(board, id).await? {
        return Err(ApiError::not_found("Post not found"));
    }

    tracing::info!(
        post_id = id,
        board = %board,
        user = %identity.username,
        "Post deleted"
    );

    Ok(Json(ApiResponse::new(())))
}
