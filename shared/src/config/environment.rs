//! Runtime environment and logging setup

use std::env;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Variable naming the environment, checked before `RUST_ENV`
pub const ENVIRONMENT_VAR: &str = "STATELESS_ENV";
/// Variable overriding the log format of the environment
pub const LOG_FORMAT_VAR: &str = "STATELESS_LOG_FORMAT";

/// Deployment profile, selects the `.env` overlay and logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Reads `STATELESS_ENV`, then `RUST_ENV`
    ///
    /// Unset or unrecognized values resolve to `Development`.
    pub fn from_env() -> Self {
        env::var(ENVIRONMENT_VAR)
            .or_else(|_| env::var("RUST_ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Overlay file loaded before `.env`
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Production => ".env.production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "test" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Subscriber output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Settings for the global `tracing` subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,

    pub format: LogFormat,

    /// Include file and line in each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Defaults for an environment
    ///
    /// Development logs every key and timeout fallback taken during policy
    /// resolution. Production keeps the one-line init summary and warnings.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                filter: String::from("st_core=debug"),
                format: LogFormat::Pretty,
                source_location: true,
            },
            Environment::Production => Self {
                filter: String::from("st_core=info"),
                format: LogFormat::Json,
                source_location: false,
            },
        }
    }

    /// Environment defaults with `STATELESS_LOG_FORMAT` applied on top
    pub fn from_env(env: Environment) -> Self {
        let mut config = Self::for_environment(env);
        if let Some(format) = env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.format = format;
        }
        config
    }

    /// Installs a global `tracing` subscriber matching this configuration
    ///
    /// `RUST_LOG` takes precedence over `filter` when set. Returns `false` if a
    /// subscriber was already installed.
    pub fn init(&self) -> bool {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(self.format != LogFormat::Json)
            .with_file(self.source_location)
            .with_line_number(self.source_location);

        let result = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
        };
        result.is_ok()
    }
}
