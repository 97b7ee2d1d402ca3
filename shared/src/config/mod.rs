//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `token` - Token policy settings and property keys

pub mod environment;
pub mod token;

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use token::TokenSettings;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub environment: Environment,

    pub logging: LoggingConfig,

    /// Token policy settings
    pub token: TokenSettings,
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// The environment-specific `.env.<environment>` file is loaded first, then
    /// the plain `.env` file. Variables already present in the process win.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        dotenvy::from_filename(env.env_file()).ok();
        dotenvy::dotenv().ok();

        Self {
            environment: env,
            logging: LoggingConfig::from_env(env),
            token: TokenSettings::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging, LoggingConfig::for_environment(Environment::Development));
        assert!(config.token.secret.is_none());
        assert!(config.token.suggest_replacement_secret);
    }
}
