use crate::classifier::{ConfigurationError, ScoringConfig, ScoringSettings};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub automation: AutomationConfig,
}

impl AppConfig {
    /// Read `.env` and the process environment.
    ///
    /// Scoring overrides are validated here so a bad table stops startup before
    /// any document is processed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let scoring = match env::var("SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => load_scoring(Path::new(path.trim()))?,
            _ => ScoringConfig::standard(),
        };

        let log_path = env::var("AUTOMATION_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("automation_log.json"));
        let digest_recipients = env::var("DIGEST_RECIPIENTS")
            .map(|raw| parse_recipients(&raw))
            .unwrap_or_else(|_| vec!["stakeholders@example.com".to_string()]);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            scoring,
            automation: AutomationConfig {
                log_path,
                digest_recipients,
            },
        })
    }
}

fn load_scoring(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
        path: path.to_path_buf(),
        source,
    })?;
    let settings =
        ScoringSettings::from_json(&raw).map_err(|source| ConfigError::ScoringFormat {
            path: path.to_path_buf(),
            source,
        })?;
    ScoringConfig::new(settings).map_err(ConfigError::Scoring)
}

fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|recipient| !recipient.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Destinations for the tier-driven automation actions.
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    pub log_path: PathBuf,
    pub digest_recipients: Vec<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    Scoring(ConfigurationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "SCORING_CONFIG '{}' could not be read", path.display())
            }
            ConfigError::ScoringFormat { path, source } => write!(
                f,
                "SCORING_CONFIG '{}' is not valid scoring JSON: {}",
                path.display(),
                source
            ),
            ConfigError::Scoring(err) => write!(f, "invalid scoring configuration: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source, .. } => Some(source),
            ConfigError::Scoring(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Thresholds;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_ANSI",
            "SCORING_CONFIG",
            "AUTOMATION_LOG_PATH",
            "DIGEST_RECIPIENTS",
        ] {
            env::remove_var(key);
        }
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("municipal-intel-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert_eq!(config.scoring.thresholds(), &Thresholds::default());
        assert_eq!(
            config.automation.log_path,
            PathBuf::from("automation_log.json")
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn scoring_overrides_are_loaded_from_file() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = scratch_file(
            "scoring-valid.json",
            r#"{ "thresholds": { "high": 60, "medium": 25, "low": 8 } }"#,
        );
        env::set_var("SCORING_CONFIG", &path);

        let config = AppConfig::load().expect("config loads");

        assert_eq!(
            config.scoring.thresholds(),
            &Thresholds {
                high: 60,
                medium: 25,
                low: 8
            }
        );
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn invalid_scoring_overrides_fail_at_load() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = scratch_file(
            "scoring-invalid.json",
            r#"{ "positive_modifiers": ["approved", "cannabis"] }"#,
        );
        env::set_var("SCORING_CONFIG", &path);

        let err = AppConfig::load().expect_err("overlapping phrase rejected");

        assert!(matches!(
            err,
            ConfigError::Scoring(ConfigurationError::OverlappingPhrase { .. })
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn digest_recipients_are_split_on_commas() {
        assert_eq!(
            parse_recipients(" clerk@city.gov, ,policy@firm.com "),
            vec!["clerk@city.gov", "policy@firm.com"]
        );
    }
}
