use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userhub::{
  adapters::http::{AuthMiddleware, configure_auth_routes, configure_user_routes},
  application::auth::{
    GetUserProfileUseCase, LoginUserUseCase, RegisterUserUseCase, ValidateTokenUseCase,
  },
  domain::auth::services::AuthService,
  domain::auth::token::TokenService,
  infrastructure::{config::Config, persistence::postgres::PostgresUserRepository},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userhub=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting user service");

  // Load configuration
  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
  })?;
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    std::time::Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(std::time::Duration::from_secs(
        config.database.acquire_timeout_seconds,
      ))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| std::io::Error::other(format!("Migration error: {}", e)))?;
  tracing::info!("Database migrations completed");

  // Initialize repositories and domain services
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));

  let token_service = Arc::new(TokenService::new(
    &config.security.jwt_secret,
    Duration::seconds(config.security.token_ttl_seconds as i64),
    config.security.issuer.clone(),
  ));

  let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_service.clone()));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(user_repo.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let validate_use_case = Arc::new(ValidateTokenUseCase::new(auth_service.clone()));
  let get_profile_use_case = Arc::new(GetUserProfileUseCase::new(user_repo.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      // Public authentication routes
      .service(web::scope("/api/v1/auth").configure(|cfg| {
        configure_auth_routes(
          cfg,
          register_use_case.clone(),
          login_use_case.clone(),
          validate_use_case.clone(),
        )
      }))
      // Protected user routes
      .service(
        web::scope("/api/v1/users")
          .wrap(AuthMiddleware::new(auth_service.clone()))
          .configure(|cfg| configure_user_routes(cfg, get_profile_use_case.clone())),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
