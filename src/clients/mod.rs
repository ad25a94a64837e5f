//! Intelligence sources.
//!
//! Each upstream (breach database, social lookup, WHOIS/DNS, reverse image
//! search, phone carrier lookup, search engines) sits behind a narrow async
//! trait. The demo implementations return simulated payloads; [`Unconfigured`]
//! stands in when demo mode is off, since no live integration exists.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::IntelConfig;

pub mod breach;
pub mod domain;
pub mod image;
pub mod phone;
pub mod search;
pub mod social;

pub use breach::{BreachSource, DemoBreachSource};
pub use domain::{DemoDomainIntel, DomainIntel};
pub use image::{DemoImageIntel, ImageIntel};
pub use phone::{DemoPhoneSource, PhoneSource};
pub use search::{DemoSearchSource, SearchSource};
pub use social::{DemoSocialSource, SocialSource};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}

/// Artificial delay standing in for a remote round trip.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    enabled: bool,
    scale: f64,
}

impl Latency {
    #[must_use]
    pub const fn new(enabled: bool, scale: f64) -> Self {
        Self { enabled, scale }
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(false, 1.0)
    }

    #[must_use]
    pub fn from_config(config: &IntelConfig) -> Self {
        Self::new(config.simulate_latency, config.latency_scale)
    }

    pub async fn simulate(&self, base: Duration) {
        if !self.enabled {
            return;
        }

        let delay = base.mul_f64(self.scale);
        if delay.is_zero() {
            return;
        }

        debug!(delay_ms = delay.as_millis(), "Simulating upstream latency");
        tokio::time::sleep(delay).await;
    }
}

/// Placeholder for every source when demo data is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

/// The full set of sources handed to the intelligence services.
#[derive(Clone)]
pub struct Providers {
    pub breach: Arc<dyn BreachSource>,

    pub social: Arc<dyn SocialSource>,

    pub domain: Arc<dyn DomainIntel>,

    pub image: Arc<dyn ImageIntel>,

    pub phone: Arc<dyn PhoneSource>,

    pub search: Arc<dyn SearchSource>,
}

impl Providers {
    #[must_use]
    pub fn demo(latency: Latency) -> Self {
        Self {
            breach: Arc::new(DemoBreachSource::new(latency)),
            social: Arc::new(DemoSocialSource::new(latency)),
            domain: Arc::new(DemoDomainIntel::new(latency)),
            image: Arc::new(DemoImageIntel::new(latency)),
            phone: Arc::new(DemoPhoneSource::new(latency)),
            search: Arc::new(DemoSearchSource::new(latency)),
        }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            breach: Arc::new(Unconfigured),
            social: Arc::new(Unconfigured),
            domain: Arc::new(Unconfigured),
            image: Arc::new(Unconfigured),
            phone: Arc::new(Unconfigured),
            search: Arc::new(Unconfigured),
        }
    }

    #[must_use]
    pub fn from_config(config: &IntelConfig) -> Self {
        if config.demo_mode {
            Self::demo(Latency::from_config(config))
        } else {
            Self::unconfigured()
        }
    }
}
