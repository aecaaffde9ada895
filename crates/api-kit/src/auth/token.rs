//! Token issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{TokenConfiguration, TOKEN_TYPE_BEARER};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Token response returned after issuing a token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Signing material derived from the token configuration.
#[derive(Clone)]
pub struct SigningConfigurations {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningConfigurations {
    pub fn from_config(config: &TokenConfiguration) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding: EncodingKey::from_secret(config.secret_bytes()),
            decoding: DecodingKey::from_secret(config.secret_bytes()),
        }
    }
}

/// Token service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `subject`
    fn issue(&self, subject: &str) -> AppResult<TokenResponse>;

    /// Verify a token and extract its claims
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 implementation of [`TokenService`].
pub struct Authenticator {
    config: TokenConfiguration,
    signing: SigningConfigurations,
}

impl Authenticator {
    pub fn new(config: TokenConfiguration) -> Self {
        let signing = SigningConfigurations::from_config(&config);
        Self { config, signing }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.signing.algorithm);
        validation.set_audience(&[self.config.audience.as_str()]);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // no clock skew
        validation.leeway = 0;
        validation
    }
}

impl TokenService for Authenticator {
    fn issue(&self, subject: &str) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.seconds);

        let claims = Claims {
            sub: subject.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(self.signing.algorithm),
            &claims,
            &self.signing.encoding,
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.seconds,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.signing.decoding, &self.validation())?;
        Ok(data.claims)
    }
}
