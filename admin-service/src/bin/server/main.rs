use std::sync::Arc;

use admin_service::admin::errors::AdminError;
use admin_service::config::BootstrapConfig;
use admin_service::config::Config;
use admin_service::domain::admin::models::CreateAdministratorCommand;
use admin_service::domain::admin::models::PlaintextPassword;
use admin_service::domain::admin::models::Username;
use admin_service::domain::admin::ports::AdminServicePort;
use admin_service::domain::admin::service::AdminService;
use admin_service::inbound::http::router::create_router;
use admin_service::outbound::repositories::PostgresAdminRepository;
use auth::JwtTokenService;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "admin-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        password_memory_cost_kib = config.password.memory_cost_kib,
        password_iterations = config.password.iterations,
        "Configuration loaded"
    );

    if config.jwt.is_placeholder() {
        tracing::warn!("Using the placeholder JWT secret; tokens are forgeable. Set ADMIN_JWT__SECRET");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_cost_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let admin_repository = Arc::new(PostgresAdminRepository::new(pg_pool));
    let admin_service = Arc::new(AdminService::new(admin_repository, password_hasher));
    let token_service = Arc::new(JwtTokenService::new(config.jwt.secret.as_bytes()));

    if let Some(bootstrap) = &config.bootstrap {
        ensure_bootstrap_administrator(admin_service.as_ref(), bootstrap).await?;
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(admin_service, token_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Create the configured bootstrap administrator unless it already exists.
async fn ensure_bootstrap_administrator(
    admin_service: &dyn AdminServicePort,
    bootstrap: &BootstrapConfig,
) -> Result<(), anyhow::Error> {
    match admin_service.find_by_username(&bootstrap.username).await {
        Ok(_) => {
            tracing::info!(username = %bootstrap.username, "Bootstrap administrator present");
            return Ok(());
        }
        Err(AdminError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let command = CreateAdministratorCommand::new(
        Username::new(bootstrap.username.clone())?,
        PlaintextPassword::new(bootstrap.password.clone())?,
    );

    match admin_service.create_administrator(command).await {
        // Another instance created it first
        Ok(_) | Err(AdminError::DuplicateUsername(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
