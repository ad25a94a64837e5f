use async_trait::async_trait;
use serde::Serialize;

use super::{Latency, ProviderError, Unconfigured};
use crate::constants::latency;

#[derive(Debug, Clone, Serialize)]
pub struct Breach {
    pub name: String,
    pub date: String,
    pub verified: bool,
    pub data_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreachReport {
    pub breaches_found: usize,
    pub breaches: Vec<Breach>,
    pub last_checked: String,
    pub source: String,
}

/// Breach database lookup (HaveIBeenPwned-shaped).
#[async_trait]
pub trait BreachSource: Send + Sync {
    async fn lookup(&self, email: &str) -> Result<BreachReport, ProviderError>;
}

pub struct DemoBreachSource {
    latency: Latency,
}

impl DemoBreachSource {
    #[must_use]
    pub const fn new(latency: Latency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl BreachSource for DemoBreachSource {
    async fn lookup(&self, _email: &str) -> Result<BreachReport, ProviderError> {
        self.latency.simulate(latency::SHORT).await;

        let breaches = vec![
            Breach {
                name: "ExampleBreach2021".to_string(),
                date: "2021-05-15".to_string(),
                verified: true,
                data_classes: vec!["Email addresses".to_string(), "Passwords".to_string()],
            },
            Breach {
                name: "TestLeak2020".to_string(),
                date: "2020-11-03".to_string(),
                verified: false,
                data_classes: vec!["Email addresses".to_string(), "Usernames".to_string()],
            },
        ];

        Ok(BreachReport {
            breaches_found: breaches.len(),
            breaches,
            last_checked: chrono::Utc::now().to_rfc3339(),
            source: "demo_data".to_string(),
        })
    }
}

#[async_trait]
impl BreachSource for Unconfigured {
    async fn lookup(&self, _email: &str) -> Result<BreachReport, ProviderError> {
        Err(ProviderError::NotConfigured("HaveIBeenPwned"))
    }
}
