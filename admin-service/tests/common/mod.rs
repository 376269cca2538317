#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use admin_service::admin::errors::AdminError;
use admin_service::domain::admin::models::Administrator;
use admin_service::domain::admin::models::AdministratorId;
use admin_service::domain::admin::models::CreateAdministratorCommand;
use admin_service::domain::admin::models::NewAdministrator;
use admin_service::domain::admin::models::PlaintextPassword;
use admin_service::domain::admin::models::Username;
use admin_service::domain::admin::ports::AdminRepository;
use admin_service::domain::admin::ports::AdminServicePort;
use admin_service::domain::admin::service::AdminService;
use admin_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::JwtHandler;
use auth::JwtTokenService;
use auth::PasswordHasher;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_USERNAME: &str = "root_admin";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Test application that spawns a real server backed by an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub admin_service: Arc<dyn AdminServicePort>,
    pub repository: Arc<InMemoryAdminRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAdminRepository::default());
        let password_hasher =
            PasswordHasher::with_cost(1024, 1, 1).expect("Failed to build password hasher");
        let admin_service: Arc<dyn AdminServicePort> =
            Arc::new(AdminService::new(Arc::clone(&repository), password_hasher));
        let token_service = Arc::new(JwtTokenService::new(TEST_JWT_SECRET));

        let router = create_router(Arc::clone(&admin_service), token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            admin_service,
            repository,
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Spawn the application with the default test administrator already stored
    pub async fn spawn_with_admin() -> Self {
        let app = Self::spawn().await;
        app.seed_admin(TEST_USERNAME, TEST_PASSWORD).await;
        app
    }

    /// Store an administrator directly through the domain service
    pub async fn seed_admin(&self, username: &str, password: &str) -> Administrator {
        let command = CreateAdministratorCommand::new(
            Username::new(username.to_string()).expect("Invalid seed username"),
            PlaintextPassword::new(password.to_string()).expect("Invalid seed password"),
        );

        self.admin_service
            .create_administrator(command)
            .await
            .expect("Failed to seed administrator")
    }

    /// Log in and return the parsed response body
    pub async fn login(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/v1/auth/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in as the default test administrator and return its access token
    pub async fn access_token(&self) -> String {
        self.login(TEST_USERNAME, TEST_PASSWORD).await["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

/// Credential store kept in memory; ids are assigned sequentially from 1
#[derive(Default)]
pub struct InMemoryAdminRepository {
    state: Mutex<InMemoryState>,
    unavailable: AtomicBool,
}

impl InMemoryAdminRepository {
    /// Make every subsequent operation fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AdminError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AdminError::PersistenceError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryState {
    next_id: i32,
    administrators: HashMap<i32, Administrator>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, administrator: NewAdministrator) -> Result<Administrator, AdminError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();

        let username = administrator.username.as_str().to_string();
        if state
            .administrators
            .values()
            .any(|existing| existing.username == username)
        {
            return Err(AdminError::DuplicateUsername(username));
        }

        state.next_id += 1;
        let created = Administrator {
            id: AdministratorId(state.next_id),
            username,
            password_hash: administrator.password_hash,
            created_at: Utc::now(),
        };
        state.administrators.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: AdministratorId) -> Result<Option<Administrator>, AdminError> {
        self.check_available()?;
        Ok(self.state.lock().unwrap().administrators.get(&id.0).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Administrator>, AdminError> {
        self.check_available()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .administrators
            .values()
            .find(|administrator| administrator.username == username)
            .cloned())
    }

    async fn delete(&self, id: AdministratorId) -> Result<(), AdminError> {
        self.check_available()?;
        self.state
            .lock()
            .unwrap()
            .administrators
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| AdminError::NotFound(format!("id {}", id)))
    }
}

static DATABASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Test database helper
///
/// Each instance owns a freshly migrated database on the server named by
/// `DATABASE_URL`. Without `DATABASE_URL` no database is created.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
            return None;
        };

        let db_name = format!(
            "test_admin_service_{}_{}_{}",
            std::process::id(),
            Utc::now().timestamp_micros(),
            DATABASE_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        let pool = self.pool.clone();
        tokio::spawn(async move {
            pool.close().await;

            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE);"#, db_name).as_str())
                    .await;
            }
        });
    }
}
