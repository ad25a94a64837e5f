use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_domain;
use super::{ApiError, ApiResponse, AppState};
use crate::clients::domain::{
    BasicInfo, DnsRecords, DomainSummary, Geolocation, RelatedDomains, SecurityAssessment,
    SubdomainReport, TechnologyStack, WhoisRecord,
};

type DomainResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct BulkDomainRequest {
    pub domains: Vec<String>,
}

/// GET /api/v1/domain/basic-info/{domain}
pub async fn basic_info(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<BasicInfo> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.basic_info(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/whois/{domain}
pub async fn whois(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<WhoisRecord> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.whois(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/dns/{domain}
pub async fn dns(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<DnsRecords> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.dns(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/subdomains/{domain}
pub async fn subdomains(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<SubdomainReport> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.subdomains(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/technology/{domain}
pub async fn technology(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<TechnologyStack> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.technology(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/security/{domain}
pub async fn security(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<SecurityAssessment> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.security(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/geolocation/{domain}
pub async fn geolocation(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<Geolocation> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.geolocation(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// GET /api/v1/domain/related/{domain}
pub async fn related(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> DomainResult<RelatedDomains> {
    let domain = validate_domain(&domain)?;
    let data = state.providers().domain.related(&domain).await?;
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/v1/domain/bulk-analyze
pub async fn bulk_analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BulkDomainRequest>, JsonRejection>,
) -> DomainResult<Vec<DomainSummary>> {
    let Json(request) = payload?;

    let domains = request
        .domains
        .iter()
        .map(|d| validate_domain(d))
        .collect::<Result<Vec<_>, _>>()?;

    let data = state.shared.intel_service.bulk_analyze_domains(&domains).await?;
    Ok(Json(ApiResponse::success(data)))
}
