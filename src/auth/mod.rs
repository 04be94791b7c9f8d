use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Claim set issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_subscription_level")]
    pub subscription_level: String,
    #[serde(default)]
    pub ghost_mode: bool,
    #[serde(default)]
    pub org_id: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

fn default_subscription_level() -> String {
    "free".to_string()
}

impl Claims {
    pub fn new(user_id: Uuid, email: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            subscription_level: default_subscription_level(),
            ghost_mode: false,
            org_id: None,
            exp: (now + expires_in).timestamp(),
            iat: Some(now.timestamp()),
        }
    }
}

/// Authenticated caller for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub subscription_level: String,
    /// Reduced-visibility flag
    pub ghost_mode: bool,
    pub org_id: Option<Uuid>,
}

impl TryFrom<Claims> for Principal {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)?;
        let org_id = claims
            .org_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|_| AuthError::InvalidClaims("org_id is not a UUID".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email,
            subscription_level: claims.subscription_level,
            ghost_mode: claims.ghost_mode,
            org_id,
        })
    }
}

/// Who is calling a route that accepts anonymous callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Authenticated(Principal),
    Anonymous,
}

impl Caller {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Caller::Authenticated(principal) => Some(principal.user_id),
            Caller::Anonymous => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    #[error("Authorization header must use Bearer token format")]
    InvalidScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a user id")]
    InvalidSubject,

    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Verifies (and, for tooling, issues) HMAC-signed tokens with the shared key.
pub struct TokenVerifier {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, algorithm: &str) -> Result<Self, AuthError> {
        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(AuthError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Ok(Self {
            algorithm,
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(&config.jwt_secret, &config.jwt_algorithm)
    }

    /// Check signature and expiry, then extract the principal.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Principal::try_from(data.claims)
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(self.algorithm), claims, &self.encoding_key)?)
    }
}
