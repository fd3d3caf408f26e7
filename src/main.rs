use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizauth::{
  adapters::http::{configure_auth_routes, configure_user_routes},
  application::admin::{
    DashboardStatsUseCase, DeleteUserUseCase, GetUserLogsUseCase, ListUsersUseCase,
    UpdateUserStatusUseCase,
  },
  application::auth::{
    ForgotPasswordUseCase, LoginUserUseCase, RegisterUserUseCase, RequestOtpUseCase,
    VerifyOtpUseCase,
  },
  domain::auth::services::{AuthService, OtpService},
  infrastructure::{
    config::Config,
    notification::{ChannelOtpDispatcher, EmailOtpSender, SmsOtpSender},
    persistence::postgres::{
      PostgresActivityLogRepository, PostgresCompanyRepository, PostgresOtpRepository,
      PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtTokenIssuer},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bizauth=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting bizauth application");

  // Load configuration
  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
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
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
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
    .map_err(|e| std::io::Error::other(format!("Failed to run database migrations: {}", e)))?;
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let company_repo = Arc::new(PostgresCompanyRepository::new(db_pool.clone()));
  let otp_repo = Arc::new(PostgresOtpRepository::new(db_pool.clone()));
  let activity_log_repo = Arc::new(PostgresActivityLogRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    std::io::Error::other(format!("Failed to create password hasher: {}", e))
  })?);
  let token_issuer = Arc::new(JwtTokenIssuer::new(
    &config.security.jwt_secret,
    config.security.token_ttl_minutes,
  ));

  // Initialize OTP delivery
  let email_sender = EmailOtpSender::new(&config.mail)
    .map_err(|e| std::io::Error::other(format!("Failed to create SMTP transport: {}", e)))?;
  let sms_sender = SmsOtpSender::new(config.sms.clone());
  let dispatcher = Arc::new(ChannelOtpDispatcher::new(email_sender, sms_sender));

  // Initialize domain services
  let otp_service = Arc::new(OtpService::new(otp_repo.clone(), dispatcher));
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    company_repo.clone(),
    otp_service,
    password_hasher,
    token_issuer,
    activity_log_repo.clone(),
  ));

  // Initialize auth use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let request_otp_use_case = Arc::new(RequestOtpUseCase::new(auth_service.clone()));
  let verify_otp_use_case = Arc::new(VerifyOtpUseCase::new(auth_service.clone()));
  let forgot_password_use_case = Arc::new(ForgotPasswordUseCase::new(auth_service.clone()));

  // Initialize admin use cases
  let list_users_use_case = Arc::new(ListUsersUseCase::new(user_repo.clone()));
  let get_user_logs_use_case = Arc::new(GetUserLogsUseCase::new(
    user_repo.clone(),
    activity_log_repo.clone(),
  ));
  let update_status_use_case = Arc::new(UpdateUserStatusUseCase::new(
    user_repo.clone(),
    activity_log_repo.clone(),
  ));
  let delete_user_use_case = Arc::new(DeleteUserUseCase::new(
    user_repo.clone(),
    activity_log_repo.clone(),
  ));
  let dashboard_stats_use_case = Arc::new(DashboardStatsUseCase::new(user_repo.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      // Configure auth API routes
      .service(web::scope("/api/auth").configure(|cfg| {
        configure_auth_routes(
          cfg,
          register_use_case.clone(),
          login_use_case.clone(),
          request_otp_use_case.clone(),
          verify_otp_use_case.clone(),
          forgot_password_use_case.clone(),
        )
      }))
      // Configure admin user-management routes
      .service(web::scope("/api/users").configure(|cfg| {
        configure_user_routes(
          cfg,
          list_users_use_case.clone(),
          get_user_logs_use_case.clone(),
          update_status_use_case.clone(),
          delete_user_use_case.clone(),
          dashboard_stats_use_case.clone(),
        )
      }))
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
