use crate::application::embed_controller::EmbedTimings;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_SDK_SCRIPT_URL: &str =
    "https://public.tableau.com/javascripts/api/tableau.embedding.3.latest.min.js";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub embed: EmbedSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}: {}", addr, e))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbedSettings {
    pub sdk_script_url: String,
    pub min_display_ms: u64,
    pub watchdog_ms: u64,
    pub poll_interval_ms: u64,
    pub probe_timeout_ms: u64,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            sdk_script_url: DEFAULT_SDK_SCRIPT_URL.to_string(),
            min_display_ms: 500,
            watchdog_ms: 10_000,
            poll_interval_ms: 250,
            probe_timeout_ms: 5_000,
        }
    }
}

impl EmbedSettings {
    pub fn timings(&self) -> EmbedTimings {
        EmbedTimings {
            min_display: Duration::from_millis(self.min_display_ms),
            watchdog: Duration::from_millis(self.watchdog_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Intervals feed tokio timers, which reject a zero period
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.poll_interval_ms > 0, "embed.poll_interval_ms must be non-zero");
        anyhow::ensure!(self.watchdog_ms > 0, "embed.watchdog_ms must be non-zero");
        Ok(())
    }
}

/// `config/site.*` if present, then `SITE_*` environment overrides
/// (e.g. `SITE_SERVER__PORT=9000`)
pub fn load_site_config() -> anyhow::Result<SiteConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/site").required(false))
        .add_source(
            config::Environment::with_prefix("SITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: SiteConfig = settings.try_deserialize()?;
    config.embed.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_source() {
        let settings = config::Config::builder().build().unwrap();
        let config: SiteConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.embed.sdk_script_url, DEFAULT_SDK_SCRIPT_URL);
        assert_eq!(config.embed.timings(), EmbedTimings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[embed]\nwatchdog_ms = 2000\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: SiteConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.embed.timings().watchdog, Duration::from_secs(2));
        assert_eq!(config.embed.min_display_ms, 500);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[embed]\npoll_interval_ms = 0\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: SiteConfig = settings.try_deserialize().unwrap();
        let error = config.embed.validate().unwrap_err();
        assert!(error.to_string().contains("poll_interval_ms"));

        let watchdog = EmbedSettings {
            watchdog_ms: 0,
            ..EmbedSettings::default()
        };
        assert!(watchdog.validate().is_err());
        assert!(EmbedSettings::default().validate().is_ok());
    }
}
