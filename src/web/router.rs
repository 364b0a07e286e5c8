//! Route table for the Agora API.
//!
//! Everything lives under `/api`. Authentication is not a router concern:
//! handlers that need a session declare the `AuthUser` extractor, so post
//! reads stay public while writes on the same path require a token.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_post, delete_post, get_post, list_posts, list_users, login, me, register, set_approval,
    update_post, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

fn board_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:board/posts", get(list_posts).post(create_post))
        .route(
            "/:board/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/approve", put(set_approval))
}

/// Assemble the API router with tracing, CORS, and token verification state.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/boards", board_routes())
        .nest("/admin", admin_routes());

    Router::new()
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    jwt_auth(jwt_state.clone(), req, next)
                })),
        )
        .with_state(app_state)
}

/// Liveness probe router, mounted outside `/api`.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}
