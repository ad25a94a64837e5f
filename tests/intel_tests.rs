use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use osint_platform::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::default();
    config.security.pbkdf2_iterations = 1_000;
    config.observability.metrics_enabled = false;
    config.intel.simulate_latency = false;
    config
}

async fn spawn_app_with(config: Config) -> Router {
    let state = osint_platform::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    osint_platform::api::router(state)
}

async fn spawn_app() -> Router {
    spawn_app_with(test_config()).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn admin_token(app: &Router) -> String {
    let response = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "admin@example.com", "password": "admin123"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Asserts a 200 `{success: true, data}` envelope and returns `data`.
async fn envelope_data(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());
    body["data"].clone()
}

// ============================================================================
// Email
// ============================================================================

#[tokio::test]
async fn test_email_investigation_is_public() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/email/investigate",
        None,
        Some(json!({"email": " Target@Example.com "})),
    )
    .await;
    let data = envelope_data(response).await;

    assert_eq!(data["email"], "target@example.com");
    assert_eq!(data["domain"], "example.com");
    assert_eq!(data["analyst"], "anonymous");
    assert_eq!(data["findings"]["breaches"]["breaches_found"], 2);
    assert!(data["findings"]["social_media"].is_object());
    assert_eq!(data["risk_assessment"]["score"], 5);
    assert_eq!(data["risk_assessment"]["level"], "medium");
    assert_eq!(data["risk_assessment"]["factors"], json!(["email_in_breaches"]));
}

#[tokio::test]
async fn test_email_investigation_records_analyst_and_flags() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/v1/email/investigate",
        Some(&token),
        Some(json!({
            "email": "target@example.com",
            "check_breaches": false,
            "check_social": false
        })),
    )
    .await;
    let data = envelope_data(response).await;

    assert_eq!(data["analyst"], "admin@example.com");
    assert!(data["findings"].get("breaches").is_none());
    assert!(data["findings"].get("social_media").is_none());
    assert!(data["findings"]["domain_intelligence"].is_object());
    assert_eq!(data["risk_assessment"]["score"], 3);
    assert_eq!(data["risk_assessment"]["level"], "low");
}

#[tokio::test]
async fn test_email_investigation_rejects_bad_email() {
    let app = spawn_app().await;

    for body in [json!({"email": "not-an-email"}), json!({})] {
        let response = send(&app, "POST", "/api/v1/email/investigate", None, Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }
}

// ============================================================================
// Domain
// ============================================================================

#[tokio::test]
async fn test_domain_endpoints_require_auth() {
    let app = spawn_app().await;
    let response = send(&app, "GET", "/api/v1/domain/whois/example.com", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_domain_whois() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = send(&app, "GET", "/api/v1/domain/whois/Example.COM", Some(&token), None).await;
    let data = envelope_data(response).await;

    assert!(data["registrant"]["email"].as_str().unwrap().contains('@'));
    assert!(!data["name_servers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_every_domain_lookup_answers() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    for path in [
        "basic-info",
        "whois",
        "dns",
        "subdomains",
        "technology",
        "security",
        "geolocation",
        "related",
    ] {
        let uri = format!("/api/v1/domain/{path}/acme.io");
        let response = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let basic = envelope_data(
        send(&app, "GET", "/api/v1/domain/basic-info/acme.io", Some(&token), None).await,
    )
    .await;
    assert_eq!(basic["domain"], "acme.io");

    let security = envelope_data(
        send(&app, "GET", "/api/v1/domain/security/acme.io", Some(&token), None).await,
    )
    .await;
    let score = security["score"].as_u64().unwrap();
    let expected = if score >= 80 {
        "low"
    } else if score >= 60 {
        "medium"
    } else {
        "high"
    };
    assert_eq!(security["risk_level"], expected);
}

#[tokio::test]
async fn test_invalid_domain_is_bad_request() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    for domain in ["not_a_domain", "-bad.com", "localhost"] {
        let uri = format!("/api/v1/domain/dns/{domain}");
        let response = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{domain}");
    }
}

#[tokio::test]
async fn test_domain_bulk_analyze() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/v1/domain/bulk-analyze",
        Some(&token),
        Some(json!({"domains": []})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let too_many: Vec<String> = (0..51).map(|i| format!("site{i}.com")).collect();
    let response = send(
        &app,
        "POST",
        "/api/v1/domain/bulk-analyze",
        Some(&token),
        Some(json!({"domains": too_many})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/v1/domain/bulk-analyze",
        Some(&token),
        Some(json!({"domains": ["alpha.com", "beta.org"]})),
    )
    .await;
    let data = envelope_data(response).await;
    let summaries = data.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["domain"], "alpha.com");
    assert_eq!(summaries[1]["domain"], "beta.org");
}

#[tokio::test]
async fn test_unconfigured_providers_are_bad_gateway() {
    let mut config = test_config();
    config.intel.demo_mode = false;
    let app = spawn_app_with(config).await;
    let token = admin_token(&app).await;

    let response = send(&app, "GET", "/api/v1/domain/whois/example.com", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);

    // Input validation still runs before any provider is consulted.
    let response = send(&app, "GET", "/api/v1/domain/whois/nope", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Image
// ============================================================================

#[tokio::test]
async fn test_image_analyze() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/v1/image/analyze",
        Some(&token),
        Some(json!({"options": {}})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No image data provided");

    let response = send(
        &app,
        "POST",
        "/api/v1/image/analyze",
        Some(&token),
        Some(json!({
            "image_data": "data:image/png;base64,iVBORw0KGgo=",
            "options": {"facialRecognition": true}
        })),
    )
    .await;
    let data = envelope_data(response).await;

    assert!(data["analysis_id"].as_str().is_some());
    assert_eq!(data["options"]["reverseSearch"], true);
    assert!(data["data"]["reverseSearch"].is_object());
    assert!(data["data"]["metadata"].is_object());
    assert!(data["data"]["faces"].is_object());
    assert!(data["data"].get("objects").is_none());
}

#[tokio::test]
async fn test_image_reverse_search_validates_url() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    for body in [
        json!({}),
        json!({"image_url": "ftp://example.com/a.jpg"}),
        json!({"image_url": "not a url"}),
    ] {
        let response = send(
            &app,
            "POST",
            "/api/v1/image/reverse-search",
            Some(&token),
            Some(body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = send(
        &app,
        "POST",
        "/api/v1/image/reverse-search",
        Some(&token),
        Some(json!({"image_url": "https://example.com/photo.jpg"})),
    )
    .await;
    let data = envelope_data(response).await;
    assert!(!data["engines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_image_extract_metadata_and_bulk() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let data = envelope_data(
        send(
            &app,
            "POST",
            "/api/v1/image/extract-metadata",
            Some(&token),
            Some(json!({})),
        )
        .await,
    )
    .await;
    assert_eq!(data["basic"]["filename"], "unknown.jpg");

    let response = send(
        &app,
        "POST",
        "/api/v1/image/bulk-analyze",
        Some(&token),
        Some(json!({"images": []})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = envelope_data(
        send(
            &app,
            "POST",
            "/api/v1/image/bulk-analyze",
            Some(&token),
            Some(json!({"images": [{"filename": "a.png", "size": "1 MB"}, {}]})),
        )
        .await,
    )
    .await;
    let results = data.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["filename"], "a.png");
    assert_eq!(results[1]["filename"], "image_2.jpg");
}

// ============================================================================
// Search, phone and tools
// ============================================================================

#[tokio::test]
async fn test_search_engines() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let response = send(&app, "GET", "/api/v1/search/engines", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let data = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/search/engines?query=acme%20corp",
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(data["query"], "acme corp");
    assert_eq!(data["engines"], json!(["google", "bing"]));

    let response = send(
        &app,
        "GET",
        "/api/v1/search/engines?query=acme&engines=,",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_phone_investigation() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let data = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/phone/investigate?phone=%2B1%20555%20123%204567",
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert!(data["carrier"].as_str().is_some());
    assert!(data["type"].as_str().is_some());

    let response = send(
        &app,
        "GET",
        "/api/v1/phone/investigate?phone=call-me",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quick_tools() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let dork = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/tools/google-dork?query=site%3Aexample.com",
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(dork["query"], "site:example.com");

    let overview = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/tools/domain-analysis?domain=example.com",
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(overview["domain"], "example.com");

    let scan = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/tools/social-scan?query=janedoe&platforms=twitter,myspace",
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    let results = scan["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["platform"], "Twitter");

    let image = envelope_data(
        send(&app, "POST", "/api/v1/tools/image-analysis", Some(&token), None).await,
    )
    .await;
    assert_eq!(image["source"], "uploaded_image.jpg");
}

#[tokio::test]
async fn test_social_scan_encodes_profile_urls() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let scan = envelope_data(
        send(
            &app,
            "GET",
            "/api/v1/tools/social-scan?query=a%20b&platforms=twitter",
            Some(&token),
            None,
        )
        .await,
    )
    .await;

    let profile = &scan["results"][0]["profiles"][0];
    assert_eq!(profile["username"], "a b");
    assert_eq!(profile["url"], "https://twitter.com/a%20b");
}
