//! Unauthenticated service endpoints: banner, health and the endpoint index.

use axum::{Json, extract::State};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{AppState, HealthResponse};

pub const SERVICE_NAME: &str = "OSINT Intelligence Platform";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DocsInfoResponse {
    pub service: String,
    pub version: String,
    pub authentication: String,
    pub endpoints: BTreeMap<&'static str, Vec<&'static str>>,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{SERVICE_NAME} API"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.store();

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        users: store.user_count().await,
        investigations: store.investigation_count().await,
    })
}

/// GET /docs-info
pub async fn docs_info() -> Json<DocsInfoResponse> {
    let endpoints = BTreeMap::from([
        (
            "authentication",
            vec![
                "POST /auth/register",
                "POST /auth/login",
                "GET /auth/profile",
                "POST /auth/logout",
            ],
        ),
        (
            "investigations",
            vec![
                "GET /api/v1/investigations",
                "POST /api/v1/investigations",
                "GET /api/v1/investigations/{id}",
                "PUT /api/v1/investigations/{id}",
                "DELETE /api/v1/investigations/{id}",
                "POST /api/v1/investigations/{id}/findings",
            ],
        ),
        ("email_intel", vec!["POST /api/v1/email/investigate"]),
        ("search", vec!["GET /api/v1/search/engines"]),
        ("phone_intel", vec!["GET /api/v1/phone/investigate"]),
        (
            "domain_intel",
            vec![
                "GET /api/v1/domain/basic-info/{domain}",
                "GET /api/v1/domain/whois/{domain}",
                "GET /api/v1/domain/dns/{domain}",
                "GET /api/v1/domain/subdomains/{domain}",
                "GET /api/v1/domain/technology/{domain}",
                "GET /api/v1/domain/security/{domain}",
                "GET /api/v1/domain/geolocation/{domain}",
                "GET /api/v1/domain/related/{domain}",
                "POST /api/v1/domain/bulk-analyze",
            ],
        ),
        (
            "image_analysis",
            vec![
                "POST /api/v1/image/analyze",
                "POST /api/v1/image/reverse-search",
                "POST /api/v1/image/extract-metadata",
                "POST /api/v1/image/bulk-analyze",
            ],
        ),
        (
            "tools",
            vec![
                "GET /api/v1/tools/google-dork",
                "GET /api/v1/tools/domain-analysis",
                "GET /api/v1/tools/social-scan",
                "POST /api/v1/tools/image-analysis",
            ],
        ),
        ("system", vec!["GET /", "GET /health", "GET /docs-info", "GET /metrics"]),
    ]);

    Json(DocsInfoResponse {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        authentication: "Authorization: Bearer <access_token> from POST /auth/login".to_string(),
        endpoints,
    })
}
