use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::admin::errors::AdminError;
use crate::admin::ports::AdminRepository;
use crate::admin::ports::AdminServicePort;
use crate::domain::admin::models::Administrator;
use crate::domain::admin::models::AdministratorId;
use crate::domain::admin::models::CreateAdministratorCommand;
use crate::domain::admin::models::NewAdministrator;
use crate::domain::admin::models::Principal;

/// Domain service implementation for administrator operations.
///
/// Authenticates credentials against the store and manages administrator
/// records. Password hashing runs on the blocking thread pool since it is
/// CPU-bound and slow.
pub struct AdminService<AR>
where
    AR: AdminRepository,
{
    repository: Arc<AR>,
    password_hasher: PasswordHasher,
}

impl<AR> AdminService<AR>
where
    AR: AdminRepository,
{
    /// Create a new administrator service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `password_hasher` - Hasher carrying the configured work factor
    pub fn new(repository: Arc<AR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AdminError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AdminError::Internal(format!("Password verification task failed: {}", e)))?;

        match verified {
            Ok(is_valid) => Ok(is_valid),
            Err(e) => {
                // Corrupt stored hash: operators see it, callers only see a failed login
                tracing::error!(error = %e, "Stored password hash could not be parsed");
                Ok(false)
            }
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AdminError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AdminError::Internal(format!("Password hashing task failed: {}", e)))??;

        Ok(hashed)
    }
}

#[async_trait]
impl<AR> AdminServicePort for AdminService<AR>
where
    AR: AdminRepository,
{
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Principal, AdminError> {
        let Some(administrator) = self.repository.find_by_username(username).await? else {
            tracing::debug!(username = %username, "Login for unknown administrator");
            return Err(AdminError::InvalidCredentials);
        };

        if !self
            .verify_password(password, &administrator.password_hash)
            .await?
        {
            tracing::debug!(username = %username, "Login with wrong password");
            return Err(AdminError::InvalidCredentials);
        }

        Ok(Principal::administrator(administrator.username))
    }

    async fn create_administrator(
        &self,
        command: CreateAdministratorCommand,
    ) -> Result<Administrator, AdminError> {
        let password_hash = self.hash_password(command.password.expose()).await?;

        let administrator = self
            .repository
            .create(NewAdministrator {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(
            administrator_id = %administrator.id,
            username = %administrator.username,
            "Administrator created"
        );

        Ok(administrator)
    }

    async fn find_by_username(&self, username: &str) -> Result<Administrator, AdminError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("username {}", username)))
    }

    async fn find_by_id(&self, id: AdministratorId) -> Result<Administrator, AdminError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("id {}", id)))
    }

    async fn delete_administrator(&self, id: AdministratorId) -> Result<(), AdminError> {
        self.repository.delete(id).await?;

        tracing::info!(administrator_id = %id, "Administrator deleted");

        Ok(())
    }
}
