use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::Providers;
use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod domain;
mod email;
mod error;
mod image;
mod investigations;
mod observability;
mod system;
mod tools;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        self.shared.config()
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn providers(&self) -> &Providers {
        self.shared.intel_service.providers()
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let public_routes = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/docs-info", get(system::docs_info))
        .route("/metrics", get(observability::get_metrics))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/api/v1/email/investigate", post(email::investigate));

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/profile", get(auth::profile))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/api/v1/investigations",
            get(investigations::list_investigations).post(investigations::create_investigation),
        )
        .route(
            "/api/v1/investigations/{id}",
            get(investigations::get_investigation)
                .put(investigations::update_investigation)
                .delete(investigations::delete_investigation),
        )
        .route(
            "/api/v1/investigations/{id}/findings",
            post(investigations::add_finding),
        )
        .route("/api/v1/domain/basic-info/{domain}", get(domain::basic_info))
        .route("/api/v1/domain/whois/{domain}", get(domain::whois))
        .route("/api/v1/domain/dns/{domain}", get(domain::dns))
        .route("/api/v1/domain/subdomains/{domain}", get(domain::subdomains))
        .route("/api/v1/domain/technology/{domain}", get(domain::technology))
        .route("/api/v1/domain/security/{domain}", get(domain::security))
        .route("/api/v1/domain/geolocation/{domain}", get(domain::geolocation))
        .route("/api/v1/domain/related/{domain}", get(domain::related))
        .route("/api/v1/domain/bulk-analyze", post(domain::bulk_analyze))
        .route("/api/v1/image/analyze", post(image::analyze))
        .route("/api/v1/image/reverse-search", post(image::reverse_search))
        .route("/api/v1/image/extract-metadata", post(image::extract_metadata))
        .route("/api/v1/image/bulk-analyze", post(image::bulk_analyze))
        .route("/api/v1/search/engines", get(tools::search_engines))
        .route("/api/v1/phone/investigate", get(tools::investigate_phone))
        .route("/api/v1/tools/google-dork", get(tools::google_dork))
        .route("/api/v1/tools/domain-analysis", get(tools::domain_analysis))
        .route("/api/v1/tools/social-scan", get(tools::social_scan))
        .route("/api/v1/tools/image-analysis", post(tools::image_analysis))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
