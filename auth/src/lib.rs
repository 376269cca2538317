//! Authentication utilities library
//!
//! Provides the token and credential primitives for the administrative API:
//! - Password hashing (Argon2id, tunable cost)
//! - Access and refresh token issuance and validation (HS256 JWT)
//!
//! Services define their own credential lookups and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtError, JwtTokenService, TokenService};
//!
//! let tokens = JwtTokenService::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let access = tokens.issue_access_token("alice", "admin").unwrap();
//! let claims = tokens.validate_access_token(&access).unwrap();
//! assert_eq!(claims.role, "admin");
//!
//! let refresh = tokens.issue_refresh_token("alice").unwrap();
//! let claims = tokens.validate_refresh_token(&refresh).unwrap();
//! assert_eq!(claims.username, "alice");
//!
//! let other = JwtTokenService::new(b"another_key_at_least_32_bytes_long");
//! assert_eq!(
//!     other.validate_access_token(&access),
//!     Err(JwtError::TokenInvalidSignature)
//! );
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::ExpiringClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::JwtTokenService;
pub use jwt::RefreshClaims;
pub use jwt::TokenService;
pub use jwt::ACCESS_TOKEN_TTL_MINUTES;
pub use jwt::REFRESH_TOKEN_TTL_DAYS;
pub use password::PasswordError;
pub use password::PasswordHasher;
