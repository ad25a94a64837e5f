use std::sync::Arc;
use tracing::info;

use crate::clients::Providers;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, InMemoryAuthService, InMemoryInvestigationService, IntelService,
    InvestigationService, PasswordHasher,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub investigation_service: Arc<dyn InvestigationService>,

    pub intel_service: Arc<IntelService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let providers = Providers::from_config(&config.intel);
        Self::with_providers(config, providers).await
    }

    /// Builds the state around an explicit set of intelligence sources.
    pub async fn with_providers(config: Config, providers: Providers) -> anyhow::Result<Self> {
        let store = Store::new();

        let hasher = PasswordHasher::with_iterations(config.security.pbkdf2_iterations);
        let auth_service = Arc::new(InMemoryAuthService::new(
            store.clone(),
            hasher,
            config.security.min_password_length,
        )) as Arc<dyn AuthService>;

        let investigation_service = Arc::new(InMemoryInvestigationService::new(store.clone()))
            as Arc<dyn InvestigationService>;

        let intel_service = Arc::new(IntelService::new(providers));

        let admin = &config.security.bootstrap_admin;
        if admin.enabled {
            let created = auth_service
                .ensure_admin(&admin.email, &admin.password)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed admin account: {e}"))?;
            if created {
                info!(email = %admin.email, "Bootstrap admin account created");
            }
        }

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_service,
            investigation_service,
            intel_service,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
