use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use std::sync::Arc;

use super::auth::extract_bearer_token;
use super::{ApiError, ApiResponse, AppState};
use crate::services::intel::{EmailInvestigationRequest, EmailReport};

const ANONYMOUS_ANALYST: &str = "anonymous";

/// POST /api/v1/email/investigate
///
/// Open to unauthenticated callers. A valid bearer token only changes who is
/// recorded as the analyst.
pub async fn investigate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<EmailInvestigationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<EmailReport>>, ApiError> {
    let Json(request) = payload?;

    let analyst = match extract_bearer_token(&headers) {
        Some(token) => state
            .shared
            .auth_service
            .authenticate(&token)
            .await
            .map_or_else(|_| ANONYMOUS_ANALYST.to_string(), |user| user.email),
        None => ANONYMOUS_ANALYST.to_string(),
    };

    let report = state
        .shared
        .intel_service
        .investigate_email(&request, &analyst)
        .await?;

    Ok(Json(ApiResponse::success(report)))
}
