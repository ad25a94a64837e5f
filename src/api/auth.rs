use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{
    ApiError, AppState, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, UserProfile,
};
use crate::models::user::{Role, User};

/// Raw bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

// ============================================================================
// Middleware
// ============================================================================

/// Resolves `Authorization: Bearer <token>` to a user and makes it available
/// to handlers as `Extension<User>`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let user = state.shared.auth_service.authenticate(&token).await?;

    tracing::Span::current().record("user_id", user.id.as_str());

    request.extensions_mut().insert(BearerToken(token));
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Scheme is matched case-insensitively; an empty token counts as absent.
pub(super) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn caller_is_admin(state: &AppState, headers: &HeaderMap) -> bool {
    let Some(token) = extract_bearer_token(headers) else {
        return false;
    };

    state
        .shared
        .auth_service
        .authenticate(&token)
        .await
        .is_ok_and(|user| user.is_admin())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(payload) = payload?;

    let role = payload
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(ApiError::validation)?
        .unwrap_or_default();

    if role == Role::Admin && !caller_is_admin(&state, &headers).await {
        tracing::warn!("Registration rejected: admin role requested without admin credentials");
        return Err(ApiError::validation(
            "Admin accounts can only be created by an administrator",
        ));
    }

    let user_id = state
        .shared
        .auth_service
        .register(&payload.email, &payload.password, role)
        .await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;

    let result = state
        .shared
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: result.access_token,
        token_type: "bearer".to_string(),
        user: result.user.into(),
    }))
}

/// GET /auth/profile
pub async fn profile(Extension(user): Extension<User>) -> Json<UserProfile> {
    Json(user.into())
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(token): Extension<BearerToken>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.shared.auth_service.logout(&token.0).await?;

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")).as_deref(), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("bearer  abc ")).as_deref(), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("BEARER abc")).as_deref(), Some("abc"));
        assert!(extract_bearer_token(&headers("Basic abc")).is_none());
        assert!(extract_bearer_token(&headers("Bearer")).is_none());
        assert!(extract_bearer_token(&headers("Bearer   ")).is_none());
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }
}
