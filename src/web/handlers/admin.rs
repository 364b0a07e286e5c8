//! Admin handlers.
//!
//! Every route here requires an admin identity.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::auth::require_admin;
use crate::db::{AccountFilter, AccountRepository};
use crate::web::dto::{
    AdminListQuery, AdminUserResponse, ApiResponse, ApprovalRequest, PaginatedResponse,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::auth::AppState;

/// GET /api/admin/users - List accounts with optional filters.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<PaginatedResponse<AdminUserResponse>>, ApiError> {
    require_admin(Some(&identity))?;

    let paging = query.pagination();
    let (offset, limit) = paging.to_offset_limit();

    let mut filter = AccountFilter::new();
    if let Some(approved) = query.approved {
        filter = filter.approved(approved);
    }
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        filter = filter.query(q);
    }

    let repo = AccountRepository::new(state.db.pool());
    let accounts = repo.list(&filter, offset, limit).await?;
    let total = repo.count(&filter).await?;

    let data = accounts.into_iter().map(AdminUserResponse::from).collect();

    Ok(Json(PaginatedResponse::new(
        data,
        paging.page(),
        paging.per_page(),
        total,
    )))
}

/// PUT /api/admin/users/:id/approve - Set an account's approval flag.
///
/// Send `{"approve": true}` to approve, `{"approve": false}` to revoke.
pub async fn set_approval(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(user_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ApprovalRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(Some(&identity))?;

    let repo = AccountRepository::new(state.db.pool());
    if !repo.set_approval(user_id, req.approve).await? {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!(
        user_id,
        approved = req.approve,
        admin = %identity.username,
        "Account approval updated"
    );

    Ok(Json(ApiResponse::new(())))
}
