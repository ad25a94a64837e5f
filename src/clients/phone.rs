use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

#[derive(Debug, Clone, Serialize)]
pub struct PhoneReport {
    pub phone: String,
    pub country: String,
    pub carrier: String,
    #[serde(rename = "type")]
    pub line_type: String,
    pub valid: bool,
    pub risk_level: String,
    pub timestamp: String,
}

/// Carrier and line-type lookup for a phone number.
#[async_trait]
pub trait PhoneSource: Send + Sync {
    async fn investigate(&self, phone: &str) -> Result<PhoneReport, ProviderError>;
}

pub struct DemoPhoneSource {
    latency: Latency,
}

impl DemoPhoneSource {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PhoneSource for DemoPhoneSource {
    async fn investigate(&self, phone: &str) -> Result<PhoneReport, ProviderError> {
        self.latency.simulate(latency::SHORT).await;

        Ok(PhoneReport {
            phone: phone.to_string(),
            country: "US".to_string(),
            carrier: "Example Carrier".to_string(),
            line_type: "mobile".to_string(),
            valid: true,
            risk_level: "low".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[async_trait]
impl PhoneSource for Unconfigured {
    async fn investigate(&self, _phone: &str) -> Result<PhoneReport, ProviderError> {
        Err(ProviderError::NotConfigured("Phone carrier lookup"))
    }
}
