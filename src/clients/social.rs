use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

#[derive(Debug, Clone, Serialize)]
pub struct SocialProfile {
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_info: Option<String>,
}

/// Accounts linked to an email address.
#[derive(Debug, Clone, Serialize)]
pub struct SocialReport {
    pub platforms_found: Vec<String>,
    pub platforms: Vec<String>,
    pub profiles: Vec<SocialProfile>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedProfile {
    pub username: String,
    pub url: String,
    pub followers: u32,
    pub verified: bool,
    pub last_activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformScan {
    pub platform: String,
    pub icon: String,
    pub color: String,
    pub profiles: Vec<ScannedProfile>,
}

/// Social network presence lookups.
#[async_trait]
pub trait SocialSource: Send + Sync {
    /// Profiles tied to an email address.
    async fn lookup(&self, email: &str) -> Result<SocialReport, ProviderError>;

    /// Username search across the named platforms. Unknown platform names are skipped.
    async fn scan(
        &self,
        query: &str,
        platforms: &[String],
    ) -> Result<Vec<PlatformScan>, ProviderError>;
}

const KNOWN_PLATFORMS: &[(&str, &str, &str)] = &[
    ("facebook", "fab fa-facebook", "#1877f2"),
    ("twitter", "fab fa-twitter", "#1da1f2"),
    ("instagram", "fab fa-instagram", "#e4405f"),
    ("linkedin", "fab fa-linkedin", "#0077b5"),
    ("youtube", "fab fa-youtube", "#ff0000"),
    ("tiktok", "fab fa-tiktok", "#000000"),
];

pub struct DemoSocialSource {
    latency: Latency,
}

impl DemoSocialSource {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn scan_platforms(query: &str, platforms: &[String]) -> Vec<PlatformScan> {
    let mut rng = rand::rng();
    let handle = query.trim().to_lowercase();
    let encoded = urlencoding::encode(&handle);

    platforms
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter_map(|platform| {
            let (name, icon, color) = KNOWN_PLATFORMS
                .iter()
                .find(|(name, _, _)| *name == platform)?;

            let mut profiles = vec![
                ScannedProfile {
                    username: handle.clone(),
                    url: format!("https://{name}.com/{encoded}"),
                    followers: rng.random_range(0..10_000),
                    verified: rng.random_range(0..10) > 7,
                    last_activity: "2 days ago".to_string(),
                },
                ScannedProfile {
                    username: format!("{handle}_official"),
                    url: format!("https://{name}.com/{encoded}_official"),
                    followers: rng.random_range(0..50_000),
                    verified: rng.random_range(0..10) > 5,
                    last_activity: "1 week ago".to_string(),
                },
            ];
            profiles.truncate(rng.random_range(1..=2));

            Some(PlatformScan {
                platform: capitalize(name),
                icon: (*icon).to_string(),
                color: (*color).to_string(),
                profiles,
            })
        })
        .collect()
}

#[async_trait]
impl SocialSource for DemoSocialSource {
    async fn lookup(&self, email: &str) -> Result<SocialReport, ProviderError> {
        let (local, _) = email
            .split_once('@')
            .ok_or_else(|| ProviderError::InvalidTarget(email.to_string()))?;

        self.latency.simulate(latency::SHORT).await;

        Ok(SocialReport {
            platforms_found: vec!["twitter".to_string(), "linkedin".to_string()],
            platforms: vec![
                "Twitter".to_string(),
                "LinkedIn".to_string(),
                "GitHub".to_string(),
            ],
            profiles: vec![
                SocialProfile {
                    platform: "twitter".to_string(),
                    username: Some(local.to_string()),
                    url: Some(format!(
                        "https://twitter.com/{}",
                        urlencoding::encode(local)
                    )),
                    verified: Some(false),
                    profile_found: None,
                    public_info: None,
                },
                SocialProfile {
                    platform: "linkedin".to_string(),
                    username: None,
                    url: None,
                    verified: None,
                    profile_found: Some(true),
                    public_info: Some("Limited profile visible".to_string()),
                },
            ],
            source: "demo_data".to_string(),
        })
    }

    async fn scan(
        &self,
        query: &str,
        platforms: &[String],
    ) -> Result<Vec<PlatformScan>, ProviderError> {
        self.latency.simulate(latency::MEDIUM).await;
        Ok(scan_platforms(query, platforms))
    }
}

#[async_trait]
impl SocialSource for Unconfigured {
    async fn lookup(&self, _email: &str) -> Result<SocialReport, ProviderError> {
        Err(ProviderError::NotConfigured("Hunter.io"))
    }

    async fn scan(
        &self,
        _query: &str,
        _platforms: &[String],
    ) -> Result<Vec<PlatformScan>, ProviderError> {
        Err(ProviderError::NotConfigured("Social scanner"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_uses_local_part() {
        let report = DemoSocialSource::new(Latency::disabled())
            .lookup("jane.doe@example.com")
            .await
            .unwrap();
        assert_eq!(report.profiles[0].username.as_deref(), Some("jane.doe"));
        assert_eq!(
            report.profiles[0].url.as_deref(),
            Some("https://twitter.com/jane.doe")
        );
    }

    #[test]
    fn test_scan_skips_unknown_platforms() {
        let platforms = vec![
            "Twitter".to_string(),
            " myspace ".to_string(),
            "linkedin".to_string(),
        ];
        let results = scan_platforms("JaneDoe", &platforms);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].platform, "Twitter");
        assert_eq!(results[1].platform, "Linkedin");
        for scan in &results {
            assert!((1..=2).contains(&scan.profiles.len()));
            assert_eq!(scan.profiles[0].username, "janedoe");
        }
    }

    #[test]
    fn test_scan_urls_encode_the_handle() {
        let results = scan_platforms("  Jane Doe/x ", &["twitter".to_string()]);

        let profiles = &results[0].profiles;
        assert_eq!(profiles[0].username, "jane doe/x");
        assert_eq!(profiles[0].url, "https://twitter.com/jane%20doe%2Fx");
        if let Some(official) = profiles.get(1) {
            assert_eq!(official.url, "https://twitter.com/jane%20doe%2Fx_official");
        }
    }
}
