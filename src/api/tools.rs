//! Quick lookup tools: search engines, phone numbers, dorks, social scans.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_domain, validate_image_url, validate_phone, validate_query};
use super::{ApiError, ApiResponse, AppState};
use crate::clients::domain::DomainOverview;
use crate::clients::image::QuickImageAnalysis;
use crate::clients::phone::PhoneReport;
use crate::clients::search::{DorkSearch, EngineSearch};
use crate::services::intel::{SocialScanReport, split_list};

type ToolResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn default_engines() -> String {
    "google,bing".to_string()
}

fn default_platforms() -> String {
    "facebook,twitter,instagram,linkedin".to_string()
}

#[derive(Debug, Deserialize)]
pub struct EngineSearchQuery {
    pub query: String,
    #[serde(default = "default_engines")]
    pub engines: String,
}

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct DorkQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub domain: String,
}

#[derive(Debug, Deserialize)]
pub struct SocialScanQuery {
    pub query: String,
    #[serde(default = "default_platforms")]
    pub platforms: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageAnalysisQuery {
    pub image_url: Option<String>,
}

/// GET /api/v1/search/engines
pub async fn search_engines(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EngineSearchQuery>, QueryRejection>,
) -> ToolResult<EngineSearch> {
    let Query(params) = query?;
    let text = validate_query("query", &params.query)?;

    let engines = split_list(&params.engines);
    if engines.is_empty() {
        return Err(ApiError::validation("At least one search engine is required"));
    }

    let data = state.providers().search.engines(text, &engines).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/phone/investigate
pub async fn investigate_phone(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PhoneQuery>, QueryRejection>,
) -> ToolResult<PhoneReport> {
    let Query(params) = query?;
    let phone = validate_phone(&params.phone)?;

    let data = state.providers().phone.investigate(phone).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/tools/google-dork
pub async fn google_dork(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DorkQuery>, QueryRejection>,
) -> ToolResult<DorkSearch> {
    let Query(params) = query?;
    let text = validate_query("query", &params.query)?;

    let data = state.providers().search.google_dork(text).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/tools/domain-analysis
pub async fn domain_analysis(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DomainQuery>, QueryRejection>,
) -> ToolResult<DomainOverview> {
    let Query(params) = query?;
    let domain = validate_domain(&params.domain)?;

    let data = state.providers().domain.overview(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/tools/social-scan
pub async fn social_scan(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SocialScanQuery>, QueryRejection>,
) -> ToolResult<SocialScanReport> {
    let Query(params) = query?;
    let text = validate_query("query", &params.query)?;

    let data = state
        .shared
        .intel_service
        .social_scan(text, &params.platforms)
        .await?;
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/v1/tools/image-analysis
///
/// Without `image_url` the analysis describes a generic uploaded file.
pub async fn image_analysis(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ImageAnalysisQuery>, QueryRejection>,
) -> ToolResult<QuickImageAnalysis> {
    let Query(params) = query?;

    let source = match params.image_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => validate_image_url(url)?,
        _ => "uploaded_image.jpg".to_string(),
    };

    let data = state.providers().image.quick_analysis(&source).await?;
    Ok(Json(ApiResponse::success(data)))
}
