use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub intel: IntelConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Emit logs as JSON lines instead of the human readable format.
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8002,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// PBKDF2-HMAC-SHA256 rounds. Stored hashes do not record the count,
    /// so changing this invalidates every existing password.
    pub pbkdf2_iterations: u32,

    pub min_password_length: usize,

    pub bootstrap_admin: BootstrapAdminConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: 100_000,
            min_password_length: 1,
            bootstrap_admin: BootstrapAdminConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapAdminConfig {
    pub enabled: bool,

    pub email: String,

    pub password: String,
}

impl Default for BootstrapAdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    /// Serve simulated payloads. When off, every provider reports itself
    /// as not configured.
    pub demo_mode: bool,

    /// Sleep before answering, the way a real upstream lookup would.
    pub simulate_latency: bool,

    /// Multiplier applied to the simulated delays.
    pub latency_scale: f64,

    pub hibp_api_key: Option<String>,

    pub hunter_api_key: Option<String>,

    pub shodan_api_key: Option<String>,

    pub virustotal_api_key: Option<String>,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            simulate_latency: false,
            latency_scale: 1.0,
            hibp_api_key: None,
            hunter_api_key: None,
            shodan_api_key: None,
            virustotal_api_key: None,
        }
    }
}

impl IntelConfig {
    /// Names of the provider keys that are unset or blank.
    #[must_use]
    pub fn missing_api_keys(&self) -> Vec<&'static str> {
        [
            ("HIBP_API_KEY", &self.hibp_api_key),
            ("HUNTER_API_KEY", &self.hunter_api_key),
            ("SHODAN_API_KEY", &self.shodan_api_key),
            ("VIRUSTOTAL_API_KEY", &self.virustotal_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("osint-platform").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".osint-platform").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.security.pbkdf2_iterations == 0 {
            anyhow::bail!("security.pbkdf2_iterations must be > 0");
        }

        let admin = &self.security.bootstrap_admin;
        if admin.enabled && (admin.email.trim().is_empty() || admin.password.is_empty()) {
            anyhow::bail!("Bootstrap admin requires both an email and a password");
        }

        if !self.intel.latency_scale.is_finite() || self.intel.latency_scale < 0.0 {
            anyhow::bail!("intel.latency_scale must be a non-negative number");
        }

        Ok(())
    }

    /// Logs which upstream keys are missing when live lookups were requested.
    pub fn report_provider_keys(&self) {
        if self.intel.demo_mode {
            info!("Demo mode enabled, intelligence endpoints serve simulated data");
            return;
        }

        let missing = self.intel.missing_api_keys();
        if missing.is_empty() {
            info!("All provider API keys configured");
        } else {
            warn!(
                missing = ?missing,
                "Provider API keys not configured; set them in [intel] or enable demo_mode"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8002);
        assert_eq!(config.security.pbkdf2_iterations, 100_000);
        assert!(config.intel.demo_mode);
        assert!(!config.intel.simulate_latency);
        assert_eq!(config.security.bootstrap_admin.email, "admin@example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[security.bootstrap_admin]"));
        assert!(toml_str.contains("[intel]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 9000

            [intel]
            demo_mode = false
            hibp_api_key = "abc"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.intel.demo_mode);
        assert_eq!(
            config.intel.missing_api_keys(),
            vec!["HUNTER_API_KEY", "SHODAN_API_KEY", "VIRUSTOTAL_API_KEY"]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.security.pbkdf2_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.security.bootstrap_admin.password = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.security.bootstrap_admin.enabled = false;
        config.security.bootstrap_admin.password = String::new();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.intel.latency_scale = -1.0;
        assert!(config.validate().is_err());
    }
}
