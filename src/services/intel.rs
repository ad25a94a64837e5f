//! Orchestration over the intelligence sources.
//!
//! Handlers that need more than a single provider call go through here:
//! email investigations combine three sources and score the result, bulk
//! requests fan out concurrently.

use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::clients::breach::BreachReport;
use crate::clients::domain::{DomainSummary, MailDomainProfile};
use crate::clients::image::BulkImageResult;
use crate::clients::social::{PlatformScan, SocialReport};
use crate::clients::{ProviderError, Providers};
use crate::constants::limits;
use crate::models::user::{is_valid_email, normalize_email};

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailInvestigationRequest {
    pub email: String,
    #[serde(default = "default_true")]
    pub check_breaches: bool,
    #[serde(default = "default_true")]
    pub check_social: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailFindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaches: Option<BreachReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialReport>,
    pub domain_intelligence: MailDomainProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: String,
    pub factors: Vec<String>,
}

impl RiskAssessment {
    const BASELINE: u8 = 3;
    const BREACH_PENALTY: u8 = 2;

    /// Scores an address from how many breaches it appears in.
    #[must_use]
    pub fn from_breaches(breaches_found: usize) -> Self {
        let mut score = Self::BASELINE;
        let mut factors = Vec::new();

        if breaches_found > 0 {
            score += Self::BREACH_PENALTY;
            factors.push("email_in_breaches".to_string());
        }

        let level = match score {
            0..=3 => "low",
            4..=6 => "medium",
            _ => "high",
        };

        Self {
            score,
            level: level.to_string(),
            factors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailReport {
    pub email: String,
    pub domain: String,
    pub timestamp: String,
    pub analyst: String,
    pub findings: EmailFindings,
    pub risk_assessment: RiskAssessment,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageDescriptor {
    pub filename: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialScanReport {
    pub query: String,
    pub platforms: Vec<String>,
    pub results: Vec<PlatformScan>,
    pub total_profiles: usize,
    pub timestamp: String,
}

/// Splits a comma separated query parameter, dropping blank entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct IntelService {
    providers: Providers,
}

impl IntelService {
    #[must_use]
    pub const fn new(providers: Providers) -> Self {
        Self { providers }
    }

    #[must_use]
    pub const fn providers(&self) -> &Providers {
        &self.providers
    }

    pub async fn investigate_email(
        &self,
        request: &EmailInvestigationRequest,
        analyst: &str,
    ) -> Result<EmailReport, IntelError> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(IntelError::Validation("Invalid email format".to_string()));
        }

        let domain = email
            .split_once('@')
            .map(|(_, domain)| domain.to_string())
            .unwrap_or_default();

        info!(email = %email, "Starting email investigation");

        let breaches = async {
            if request.check_breaches {
                self.providers.breach.lookup(&email).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let social = async {
            if request.check_social {
                self.providers.social.lookup(&email).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let mail = self.providers.domain.mail_profile(&domain);

        let (breaches, social_media, domain_intelligence) = tokio::try_join!(breaches, social, mail)?;

        let risk_assessment =
            RiskAssessment::from_breaches(breaches.as_ref().map_or(0, |b| b.breaches_found));

        debug!(
            email = %email,
            score = risk_assessment.score,
            "Email investigation complete"
        );

        Ok(EmailReport {
            email,
            domain,
            timestamp: Utc::now().to_rfc3339(),
            analyst: analyst.to_string(),
            findings: EmailFindings {
                breaches,
                social_media,
                domain_intelligence,
            },
            risk_assessment,
        })
    }

    /// Summarises each domain concurrently. Callers validate the names.
    pub async fn bulk_analyze_domains(
        &self,
        domains: &[String],
    ) -> Result<Vec<DomainSummary>, IntelError> {
        if domains.is_empty() {
            return Err(IntelError::Validation("No domains provided".to_string()));
        }
        if domains.len() > limits::MAX_BULK_DOMAINS {
            return Err(IntelError::Validation(format!(
                "At most {} domains per request",
                limits::MAX_BULK_DOMAINS
            )));
        }

        info!(count = domains.len(), "Bulk domain analysis");

        let results = try_join_all(
            domains
                .iter()
                .map(|domain| self.providers.domain.summary(domain)),
        )
        .await?;

        Ok(results)
    }

    pub async fn bulk_analyze_images(
        &self,
        images: &[ImageDescriptor],
    ) -> Result<Vec<BulkImageResult>, IntelError> {
        if images.is_empty() {
            return Err(IntelError::Validation("No images provided".to_string()));
        }
        if images.len() > limits::MAX_BULK_IMAGES {
            return Err(IntelError::Validation(format!(
                "At most {} images per request",
                limits::MAX_BULK_IMAGES
            )));
        }

        info!(count = images.len(), "Bulk image analysis");

        let results = try_join_all(images.iter().enumerate().map(|(index, image)| {
            self.providers.image.bulk_entry(
                index,
                image.filename.as_deref(),
                image.size.as_deref(),
            )
        }))
        .await?;

        Ok(results)
    }

    pub async fn social_scan(
        &self,
        query: &str,
        platforms: &str,
    ) -> Result<SocialScanReport, IntelError> {
        let platforms = split_list(platforms);
        let results = self.providers.social.scan(query, &platforms).await?;

        Ok(SocialScanReport {
            query: query.to_string(),
            platforms,
            total_profiles: results.iter().map(|r| r.profiles.len()).sum(),
            results,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
