use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, InvestigationListResponse, MessageResponse};
use crate::models::investigation::{
    Finding, Investigation, InvestigationUpdate, NewFinding, NewInvestigation,
};
use crate::models::user::User;

/// GET /api/v1/investigations
pub async fn list_investigations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Json<InvestigationListResponse> {
    let list = state.shared.investigation_service.list(&user).await;

    Json(InvestigationListResponse {
        total: list.investigations.len(),
        investigations: list.investigations,
        statistics: list.statistics,
    })
}

/// POST /api/v1/investigations
pub async fn create_investigation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<NewInvestigation>, JsonRejection>,
) -> Result<(StatusCode, Json<Investigation>), ApiError> {
    let Json(input) = payload?;

    let investigation = state
        .shared
        .investigation_service
        .create(&user, input)
        .await?;

    Ok((StatusCode::CREATED, Json(investigation)))
}

/// GET /api/v1/investigations/{id}
pub async fn get_investigation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Investigation>, ApiError> {
    let investigation = state.shared.investigation_service.get(&user, &id).await?;
    Ok(Json(investigation))
}

/// PUT /api/v1/investigations/{id}
pub async fn update_investigation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    payload: Result<Json<InvestigationUpdate>, JsonRejection>,
) -> Result<Json<Investigation>, ApiError> {
    let Json(update) = payload?;

    let investigation = state
        .shared
        .investigation_service
        .update(&user, &id, update)
        .await?;

    Ok(Json(investigation))
}

/// DELETE /api/v1/investigations/{id}
pub async fn delete_investigation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.shared.investigation_service.delete(&user, &id).await?;

    Ok(Json(MessageResponse {
        message: format!("Investigation {id} deleted"),
    }))
}

/// POST /api/v1/investigations/{id}/findings
pub async fn add_finding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    payload: Result<Json<NewFinding>, JsonRejection>,
) -> Result<(StatusCode, Json<Finding>), ApiError> {
    let Json(input) = payload?;

    let finding = state
        .shared
        .investigation_service
        .add_finding(&user, &id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(finding)))
}
