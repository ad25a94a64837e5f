use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_image_url;
use super::{ApiError, ApiResponse, AppState};
use crate::clients::image::{
    AnalysisOptions, BulkImageResult, ExtractedMetadata, ImageAnalysis, ReverseSearchReport,
};
use crate::services::intel::ImageDescriptor;

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

#[derive(Debug, Deserialize)]
pub struct ReverseSearchRequest {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractMetadataRequest {
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkImageRequest {
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

/// POST /api/v1/image/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ImageAnalysis>>, ApiError> {
    let Json(request) = payload?;

    if request
        .image_data
        .as_deref()
        .is_none_or(|data| data.trim().is_empty())
    {
        return Err(ApiError::validation("No image data provided"));
    }

    let data = state.providers().image.analyze(request.options).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/v1/image/reverse-search
pub async fn reverse_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReverseSearchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ReverseSearchReport>>, ApiError> {
    let Json(request) = payload?;

    let image_url = validate_image_url(request.image_url.as_deref().unwrap_or_default())?;
    let data = state.providers().image.reverse_search(&image_url).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/v1/image/extract-metadata
pub async fn extract_metadata(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractMetadataRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ExtractedMetadata>>, ApiError> {
    let Json(request) = payload?;

    let filename = request
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());

    let data = state.providers().image.extract_metadata(filename).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/v1/image/bulk-analyze
pub async fn bulk_analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BulkImageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<BulkImageResult>>>, ApiError> {
    let Json(request) = payload?;

    let data = state
        .shared
        .intel_service
        .bulk_analyze_images(&request.images)
        .await?;
    Ok(Json(ApiResponse::success(data)))
}
