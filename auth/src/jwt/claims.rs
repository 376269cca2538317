use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Payload of a short-lived access token.
///
/// Possession of a validly signed, unexpired access token is authentication:
/// no server-side record backs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    pub username: String,

    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create access claims issued now, expiring after [`ACCESS_TOKEN_TTL_MINUTES`].
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self::issued_at(username, role, Utc::now())
    }

    /// Create access claims with an explicit issuance instant.
    ///
    /// # Arguments
    /// * `username` - Principal the token is issued to
    /// * `role` - Role asserted for the principal
    /// * `now` - Issuance instant; expiry is derived from it
    pub fn issued_at(
        username: impl Into<String>,
        role: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expiration = now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES);

        Self {
            username: username.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

/// Payload of a long-lived refresh token.
///
/// Carries no role: whoever exchanges it must re-derive the principal from the
/// credential store. Unknown fields are rejected so that an access token can
/// never be presented in place of a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Create refresh claims issued now, expiring after [`REFRESH_TOKEN_TTL_DAYS`].
    pub fn new(username: impl Into<String>) -> Self {
        Self::issued_at(username, Utc::now())
    }

    pub fn issued_at(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        let expiration = now + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        Self {
            username: username.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}

/// Claims carrying an expiry instant.
pub trait ExpiringClaims {
    fn expires_at(&self) -> i64;

    /// Check if the token is expired. A token is only live while `exp > now`.
    fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at() <= current_timestamp
    }
}

impl ExpiringClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

impl ExpiringClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
