use async_trait::async_trait;

use crate::admin::errors::AdminError;
use crate::domain::admin::models::Administrator;
use crate::domain::admin::models::AdministratorId;
use crate::domain::admin::models::CreateAdministratorCommand;
use crate::domain::admin::models::NewAdministrator;
use crate::domain::admin::models::Principal;

/// Port for administrator domain service operations.
#[async_trait]
pub trait AdminServicePort: Send + Sync + 'static {
    /// Turn a username/password pair into an authenticated principal.
    ///
    /// # Arguments
    /// * `username` - Username as submitted (case-sensitive)
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// Principal carrying the administrator role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `PersistenceError` - Credential store lookup failed
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Principal, AdminError>;

    /// Create a new administrator, hashing the password before it is stored.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Created administrator record
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `PersistenceError` - Store operation failed
    async fn create_administrator(
        &self,
        command: CreateAdministratorCommand,
    ) -> Result<Administrator, AdminError>;

    /// Retrieve administrator by username.
    ///
    /// # Errors
    /// * `NotFound` - No administrator with this username
    /// * `PersistenceError` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Administrator, AdminError>;

    /// Retrieve administrator by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Administrator does not exist
    /// * `PersistenceError` - Store operation failed
    async fn find_by_id(&self, id: AdministratorId) -> Result<Administrator, AdminError>;

    /// Delete an administrator. Outstanding refresh tokens for it stop working.
    ///
    /// # Errors
    /// * `NotFound` - Administrator does not exist
    /// * `PersistenceError` - Store operation failed
    async fn delete_administrator(&self, id: AdministratorId) -> Result<(), AdminError>;
}

/// Persistence operations for administrator records (the credential store).
#[async_trait]
pub trait AdminRepository: Send + Sync + 'static {
    /// Persist a new administrator; the store assigns the id.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username uniqueness constraint violated
    /// * `PersistenceError` - Database operation failed
    async fn create(&self, administrator: NewAdministrator) -> Result<Administrator, AdminError>;

    /// Retrieve administrator by identifier.
    ///
    /// # Returns
    /// Optional administrator (None if not found)
    async fn find_by_id(&self, id: AdministratorId) -> Result<Option<Administrator>, AdminError>;

    /// Retrieve administrator by exact, case-sensitive username.
    ///
    /// # Returns
    /// Optional administrator (None if not found)
    async fn find_by_username(&self, username: &str)
        -> Result<Option<Administrator>, AdminError>;

    /// Remove administrator from storage.
    ///
    /// # Errors
    /// * `NotFound` - Administrator does not exist
    /// * `PersistenceError` - Database operation failed
    async fn delete(&self, id: AdministratorId) -> Result<(), AdminError>;
}
