//! Bearer-token authentication for the Web API.
//!
//! A thin middleware stores the shared verification state in request
//! extensions; the [`AuthUser`] extractor does the actual token check.
//! Routes that never name `AuthUser` stay public without any opt-out.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::sync::Arc;

use crate::auth::{Identity, JwtClaims};
use crate::web::error::ApiError;

/// Key material and validation settings shared by all requests.
#[derive(Clone)]
pub struct JwtState {
    pub decoding_key: DecodingKey,
    pub validation: Validation,
}

impl JwtState {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

/// Extractor that requires a valid session token.
///
/// Declaring `AuthUser` in a handler's signature is what makes a route
/// authenticated. On success the handler gets the verified [`Identity`];
/// authorization decisions against it belong to the policy layer. A missing
/// header, a non-Bearer scheme, a bad signature, and an expired token all
/// collapse into the same 401 so callers learn nothing about which check
/// failed.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
                .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

            // Injected by jwt_auth; absence is a wiring bug, not a client error.
            let jwt_state = parts
                .extensions
                .get::<Arc<JwtState>>()
                .ok_or_else(|| ApiError::internal("JWT state not configured"))?;

            let token_data =
                decode::<JwtClaims>(token, &jwt_state.decoding_key, &jwt_state.validation)
                    .map_err(|e| {
                        tracing::debug!("Session token rejected: {e}");
                        ApiError::unauthorized("Invalid or expired token")
                    })?;

            Ok(AuthUser(Identity::from(token_data.claims)))
        })
    }
}

/// Makes the verification state reachable from extractors on every request.
pub async fn jwt_auth(
    jwt_state: Arc<JwtState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(jwt_state);
    next.run(request).await
}
