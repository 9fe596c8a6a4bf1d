//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration.

use std::net::SocketAddr;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Cash each seat starts with when a room is created
    pub starting_cash: i64,
    /// Fixed dice seed; unset means OS-seeded dice
    pub dice_seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `cash_override` - Optional starting cash override (from CLI args)
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        cash_override: Option<i64>,
    ) -> Result<Self, ConfigError> {
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:8008"
                    .parse()
                    .expect("Default bind address is valid")
            });

        let starting_cash = cash_override.unwrap_or_else(|| parse_env_or("STARTING_CASH", 1_500));

        let dice_seed = std::env::var("DICE_SEED").ok().and_then(|v| v.parse().ok());

        let config = ServerConfig {
            bind,
            starting_cash,
            dice_seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_cash <= 0 {
            return Err(ConfigError::Invalid {
                var: "STARTING_CASH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "STARTING_CASH".to_string(),
            reason: "Must be greater than 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("STARTING_CASH"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn test_config_validation_rejects_zero_cash() {
        let config = ServerConfig {
            bind: "127.0.0.1:8008".parse().unwrap(),
            starting_cash: 0,
            dice_seed: None,
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_accepts_positive_cash() {
        let config = ServerConfig {
            bind: "127.0.0.1:8008".parse().unwrap(),
            starting_cash: 1_500,
            dice_seed: Some(7),
        };

        assert!(config.validate().is_ok());
    }
}
