use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for matchflow
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchflowConfig {
    /// Search session timing and sizing
    pub search: SearchConfig,
    /// Call workflow timing
    pub call: CallConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Total simulated search duration in milliseconds
    pub duration_ms: u64,
    /// Tick cadence of the real-time driver in milliseconds
    pub tick_interval_ms: u64,
    /// Loader-to-match-list settle delay in milliseconds (zero is valid)
    pub settle_delay_ms: u64,
    /// Minimum match score kept at publication time
    pub min_score: u8,
    /// Maximum number of results published per search
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duration_ms: 10_000,
            tick_interval_ms: 250,
            settle_delay_ms: 1_000,
            min_score: 60,
            max_results: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CallConfig {
    /// Simulated dial-to-pickup delay in milliseconds
    pub pickup_delay_ms: u64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            pickup_delay_ms: 1_500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON-structured logs instead of plain text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl MatchflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (matchflow.toml)
    /// 3. Environment variables (prefixed with MATCHFLOW__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("matchflow.toml").exists() {
            builder = builder.add_source(File::with_name("matchflow"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MATCHFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let matchflow_config: MatchflowConfig = config.try_deserialize()?;
        Ok(matchflow_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<MatchflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = MatchflowConfig::load_env_file();
        MatchflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static MatchflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_observed_ui_timings() {
        let cfg = MatchflowConfig::default();
        assert_eq!(cfg.search.duration_ms, 10_000);
        assert_eq!(cfg.search.settle_delay_ms, 1_000);
        assert_eq!(cfg.call.pickup_delay_ms, 1_500);
        assert_eq!(cfg.search.max_results, 5);
        assert_eq!(cfg.observability.log_level, "info");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = MatchflowConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: MatchflowConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.search.duration_ms, cfg.search.duration_ms);
        assert_eq!(back.observability.log_level, cfg.observability.log_level);
    }
}
