use thiserror::Error;

/// Error type for JWT operations.
///
/// Validation failures keep their kind so callers can tell them apart in
/// logs, even when they collapse them into a single rejection for clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Token signature is invalid")]
    TokenInvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Failed to sign token: {0}")]
    InternalSigningError(String),
}
