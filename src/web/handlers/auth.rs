//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{RegistrationRequest, SessionError, SessionIssuer, SESSION_TTL_SECS};
use crate::db::AccountRepository;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Session issuer for login.
    pub issuer: SessionIssuer,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Fails when the signing secret is empty.
    pub fn new(db: Arc<Database>, jwt_secret: &str) -> Result<Self, SessionError> {
        Ok(Self {
            db,
            issuer: SessionIssuer::new(jwt_secret)?,
        })
    }
}

/// POST /api/auth/register - Create an account.
///
/// New accounts start unapproved and without admin rights.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let repo = AccountRepository::new(state.db.pool());
    let request = RegistrationRequest::new(req.username, req.nickname, req.password, req.email);

    let account = crate::auth::register(&repo, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisterResponse { id: account.id })),
    ))
}

/// POST /api/auth/login - Issue a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let repo = AccountRepository::new(state.db.pool());
    let (token, account) = state
        .issuer
        .issue(&repo, &req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::new(LoginResponse {
        token,
        expires_in: SESSION_TTL_SECS,
        user: UserInfo::from(account),
    })))
}

/// GET /api/auth/me - Fresh account snapshot for the token holder.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let repo = AccountRepository::new(state.db.pool());
    let account = repo
        .get_by_id(identity.subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserInfo::from(account))))
}
