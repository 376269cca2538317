use chrono::Utc;
use serde::de::DeserializeOwned;

use super::claims::AccessClaims;
use super::claims::ExpiringClaims;
use super::claims::RefreshClaims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Capability to issue and validate session tokens.
///
/// Implementations are stateless over their inputs and an immutable signing
/// secret, so they can be shared freely between concurrent requests.
pub trait TokenService: Send + Sync + 'static {
    /// Issue a short-lived access token for a principal.
    ///
    /// # Errors
    /// * `InternalSigningError` - Signing primitive failed
    fn issue_access_token(&self, username: &str, role: &str) -> Result<String, JwtError>;

    /// Issue a long-lived refresh token. Carries no role.
    ///
    /// # Errors
    /// * `InternalSigningError` - Signing primitive failed
    fn issue_refresh_token(&self, username: &str) -> Result<String, JwtError>;

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be parsed or is not an access token
    /// * `TokenInvalidSignature` - Signature does not verify
    /// * `TokenExpired` - Token is past its expiry
    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError>;

    /// Validate a refresh token and return its claims.
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be parsed or is not a refresh token
    /// * `TokenInvalidSignature` - Signature does not verify
    /// * `TokenExpired` - Token is past its expiry
    fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError>;
}

/// HMAC-signed JWT implementation of [`TokenService`].
pub struct JwtTokenService {
    handler: JwtHandler,
}

impl JwtTokenService {
    /// Create a token service signing with the given secret.
    ///
    /// The secret is fixed for the lifetime of the service.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            handler: JwtHandler::new(secret),
        }
    }

    fn validate<T>(&self, token: &str) -> Result<T, JwtError>
    where
        T: DeserializeOwned + ExpiringClaims,
    {
        let claims: T = self.handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue_access_token(&self, username: &str, role: &str) -> Result<String, JwtError> {
        self.handler.encode(&AccessClaims::new(username, role))
    }

    fn issue_refresh_token(&self, username: &str) -> Result<String, JwtError> {
        self.handler.encode(&RefreshClaims::new(username))
    }

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.validate(token)
    }

    fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.validate(token)
    }
}
