use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::admin::errors::PlaintextPasswordError;
use crate::admin::errors::UsernameError;

/// Role asserted for every principal authenticated against the administrator store.
pub const ADMIN_ROLE: &str = "admin";

/// Administrator record as held by the credential store.
#[derive(Debug, Clone)]
pub struct Administrator {
    pub id: AdministratorId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Store-assigned administrator identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdministratorId(pub i32);

impl AdministratorId {
    /// Parse an administrator ID from its decimal representation.
    ///
    /// # Returns
    /// Parsed id, or `None` when the string is not an integer
    pub fn from_string(s: &str) -> Option<Self> {
        s.parse::<i32>().ok().map(AdministratorId)
    }
}

impl fmt::Display for AdministratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: String,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Principal for an authenticated administrator.
    pub fn administrator(username: impl Into<String>) -> Self {
        Self::new(username, ADMIN_ROLE)
    }
}

/// Username value type for new administrators.
///
/// Ensures username is 3-50 characters. Usernames are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for a new administrator.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaintextPassword(String);

impl PlaintextPassword {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PlaintextPasswordError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PlaintextPasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaintextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextPassword(***)")
    }
}

/// Command to create a new administrator with domain types
#[derive(Debug)]
pub struct CreateAdministratorCommand {
    pub username: Username,
    pub password: PlaintextPassword,
}

impl CreateAdministratorCommand {
    pub fn new(username: Username, password: PlaintextPassword) -> Self {
        Self { username, password }
    }
}

/// Administrator data handed to the store; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAdministrator {
    pub username: Username,
    pub password_hash: String,
}
