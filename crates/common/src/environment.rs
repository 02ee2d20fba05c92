//! Delta Exchange environment configuration.
//!
//! Supports production and testnet environments with appropriate URLs, plus an
//! explicit base URL override for mirrors and local test servers.

use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the environment.
pub const ENVIRONMENT_ENV: &str = "DELTA_ENVIRONMENT";

/// Environment variable overriding the REST base URL.
pub const BASE_URL_ENV: &str = "DELTA_BASE_URL";

/// Delta Exchange environment (production or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaEnvironment {
    /// Production environment (real money).
    #[default]
    Production,
    /// Testnet environment (fake money for testing).
    Testnet,
}

impl DeltaEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.delta.exchange",
            Self::Testnet => "https://testnet-api.delta.exchange",
        }
    }

    /// Returns true if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Load environment from `DELTA_ENVIRONMENT` env var.
    ///
    /// Returns `Production` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// REST base URL, honouring `DELTA_BASE_URL` when it is set.
    pub fn rest_base_url_from_env(&self) -> String {
        resolve_base_url(*self, std::env::var(BASE_URL_ENV).ok())
    }
}

/// Pick the override when it is non-blank, otherwise the environment's URL.
pub fn resolve_base_url(environment: DeltaEnvironment, override_url: Option<String>) -> String {
    match override_url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => environment.rest_base_url().to_string(),
    }
}

impl fmt::Display for DeltaEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for DeltaEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "mainnet" | "main" => Ok(Self::Production),
            "testnet" | "test" | "sandbox" => Ok(Self::Testnet),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'production' or 'testnet'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_url() {
        let env = DeltaEnvironment::Production;
        assert_eq!(env.rest_base_url(), "https://api.delta.exchange");
        assert!(env.is_production());
    }

    #[test]
    fn test_testnet_url() {
        let env = DeltaEnvironment::Testnet;
        assert_eq!(env.rest_base_url(), "https://testnet-api.delta.exchange");
        assert!(!env.is_production());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "prod".parse::<DeltaEnvironment>().unwrap(),
            DeltaEnvironment::Production
        );
        assert_eq!(
            "MAINNET".parse::<DeltaEnvironment>().unwrap(),
            DeltaEnvironment::Production
        );
        assert_eq!(
            "SANDBOX".parse::<DeltaEnvironment>().unwrap(),
            DeltaEnvironment::Testnet
        );
    }

    #[test]
    fn test_parse_invalid() {
        let err = "staging".parse::<DeltaEnvironment>().unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_display_round_trips() {
        for env in [DeltaEnvironment::Production, DeltaEnvironment::Testnet] {
            assert_eq!(env.to_string().parse::<DeltaEnvironment>().unwrap(), env);
        }
    }

    #[test]
    fn test_override_wins_when_set() {
        assert_eq!(
            resolve_base_url(
                DeltaEnvironment::Production,
                Some("http://192.168.56.1:8080".into())
            ),
            "http://192.168.56.1:8080"
        );
    }

    #[test]
    fn test_blank_override_is_ignored() {
        assert_eq!(
            resolve_base_url(DeltaEnvironment::Testnet, Some("  ".into())),
            "https://testnet-api.delta.exchange"
        );
        assert_eq!(
            resolve_base_url(DeltaEnvironment::Production, None),
            "https://api.delta.exchange"
        );
    }
}
