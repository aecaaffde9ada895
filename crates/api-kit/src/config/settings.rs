//! Application settings loaded from environment variables.

use std::env;

use super::constants::*;
use crate::errors::{AppError, AppResult};

/// Token section: signing secret and the claims every token carries.
#[derive(Clone)]
pub struct TokenConfiguration {
    secret_key: String,
    pub audience: String,
    pub issuer: String,
    pub seconds: i64,
}

impl TokenConfiguration {
    /// Create a token section, rejecting secrets that are too short.
    pub fn new(
        secret_key: impl Into<String>,
        audience: impl Into<String>,
        issuer: impl Into<String>,
        seconds: i64,
    ) -> AppResult<Self> {
        let secret_key = secret_key.into();
        if secret_key.len() < MIN_TOKEN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "{} must be at least {} characters long",
                ENV_TOKEN_SECRET_KEY, MIN_TOKEN_SECRET_LENGTH
            )));
        }
        if seconds <= 0 {
            return Err(AppError::configuration(format!(
                "{} must be a positive number of seconds",
                ENV_TOKEN_SECONDS
            )));
        }

        Ok(Self {
            secret_key,
            audience: audience.into(),
            issuer: issuer.into(),
            seconds,
        })
    }

    /// Get secret bytes for token signing/verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }
}

impl std::fmt::Debug for TokenConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfiguration")
            .field("secret_key", &"[REDACTED]")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("seconds", &self.seconds)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Overrides the startup's own Swagger default when set
    pub swagger_enabled: Option<bool>,
    /// Overrides the startup's own authentication default when set
    pub authentication_enabled: Option<bool>,
    /// Present only when a signing secret is configured
    pub token: Option<TokenConfiguration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("swagger_enabled", &self.swagger_enabled)
            .field("authentication_enabled", &self.authentication_enabled)
            .field("token", &self.token)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            swagger_enabled: None,
            authentication_enabled: None,
            token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = match lookup(ENV_TOKEN_SECRET_KEY) {
            Some(secret) => {
                let seconds = match lookup(ENV_TOKEN_SECONDS) {
                    Some(raw) => raw.parse().map_err(|_| {
                        AppError::configuration(format!(
                            "{} must be an integer, got '{}'",
                            ENV_TOKEN_SECONDS, raw
                        ))
                    })?,
                    None => DEFAULT_TOKEN_SECONDS,
                };
                Some(TokenConfiguration::new(
                    secret,
                    lookup(ENV_TOKEN_AUDIENCE).unwrap_or_else(|| DEFAULT_TOKEN_AUDIENCE.to_string()),
                    lookup(ENV_TOKEN_ISSUER).unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string()),
                    seconds,
                )?)
            }
            None => None,
        };

        Ok(Self {
            database_url: lookup(ENV_DATABASE_URL)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_host: lookup(ENV_SERVER_HOST)
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: lookup(ENV_SERVER_PORT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            swagger_enabled: parse_flag(&lookup, ENV_SWAGGER_ENABLED)?,
            authentication_enabled: parse_flag(&lookup, ENV_AUTH_ENABLED)?,
            token,
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> AppResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(None),
        Some("1" | "true" | "yes" | "on") => Ok(Some(true)),
        Some("0" | "false" | "no" | "off") => Ok(Some(false)),
        Some(other) => Err(AppError::configuration(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_token_section() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert!(config.token.is_none());
        assert!(config.swagger_enabled.is_none());
    }

    #[test]
    fn test_token_section() {
        let config = Config::from_lookup(lookup(&[
            (ENV_TOKEN_SECRET_KEY, "0123456789abcdef0123456789abcdef"),
            (ENV_TOKEN_ISSUER, "issuer"),
            (ENV_TOKEN_SECONDS, "60"),
        ]))
        .unwrap();

        let token = config.token.unwrap();
        assert_eq!(token.issuer, "issuer");
        assert_eq!(token.audience, DEFAULT_TOKEN_AUDIENCE);
        assert_eq!(token.seconds, 60);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::from_lookup(lookup(&[(ENV_TOKEN_SECRET_KEY, "short")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_flags() {
        let config = Config::from_lookup(lookup(&[
            (ENV_SWAGGER_ENABLED, "false"),
            (ENV_AUTH_ENABLED, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.swagger_enabled, Some(false));
        assert_eq!(config.authentication_enabled, Some(true));

        let bad = Config::from_lookup(lookup(&[(ENV_AUTH_ENABLED, "maybe")]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup(&[(
            ENV_TOKEN_SECRET_KEY,
            "0123456789abcdef0123456789abcdef",
        )]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("0123456789abcdef"));
        assert!(printed.contains("[REDACTED]"));
    }
}
