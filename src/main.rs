//! EVSlot Booking Service entrypoint

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use evslot::application::services::{
    start_booking_expiry_task, PaymentService, RandomOtpGenerator, RegistrationConfig,
    RegistrationService, ReservationService,
};
use evslot::config::{default_config_path, AppConfig};
use evslot::domain::account::{Account, AccountRole};
use evslot::domain::RepositoryProvider;
use evslot::infrastructure::crypto::{hash_password, JwtConfig};
use evslot::infrastructure::database::migrator::Migrator;
use evslot::infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use evslot::infrastructure::notify::LogOtpSink;
use evslot::interfaces::http::middleware::AuthState;
use evslot::interfaces::http::router::AppState;
use evslot::shared::shutdown::ShutdownCoordinator;

fn config_path() -> PathBuf {
    std::env::var("EVSLOT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

fn load_config() -> AppConfig {
    let path = config_path();
    match AppConfig::load(&path) {
        Ok(cfg) => {
            info!("Loaded configuration from {}", path.display());
            cfg
        }
        Err(e) => {
            warn!("{} - using default configuration", e);
            AppConfig::default()
        }
    }
}

/// Seed a default admin account when the accounts table is empty.
async fn create_default_admin(
    repos: &Arc<dyn RepositoryProvider>,
    cfg: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if repos.accounts().count().await? > 0 {
        return Ok(());
    }

    let admin = Account {
        id: uuid::Uuid::new_v4().to_string(),
        email: cfg.admin.email.clone(),
        name: cfg.admin.name.clone(),
        phone: String::new(),
        password_hash: Some(hash_password(
            &cfg.admin.password,
            cfg.security.pbkdf2_iterations,
        )),
        is_verified: true,
        is_active: true,
        otp_code: None,
        otp_expires_at: None,
        role: AccountRole::Admin,
        created_at: chrono::Utc::now(),
    };

    repos.accounts().save(admin).await?;
    info!("✅ Default admin account created: {}", cfg.admin.email);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = {
        // Bootstrap logging so config load errors are visible, then
        // re-read the level from the loaded config.
        let cfg = AppConfig::default();
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(cfg.logging.level.clone())),
            )
            .init();
        load_config()
    };

    info!("🚀 Starting EVSlot Booking Service v{}", env!("CARGO_PKG_VERSION"));

    // Database
    let db_config = DatabaseConfig {
        url: cfg.database.connection_url(),
    };
    let db = init_database(&db_config).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    create_default_admin(&repos, &cfg).await?;

    // Services
    let jwt_config = JwtConfig {
        secret: cfg.security.jwt_secret.clone(),
        expiration_hours: cfg.security.jwt_expiration_hours,
        issuer: "evslot-service".to_string(),
    };
    let registration = Arc::new(RegistrationService::new(
        Arc::clone(&repos),
        Arc::new(LogOtpSink),
        Arc::new(RandomOtpGenerator),
        RegistrationConfig {
            otp_ttl_minutes: cfg.otp.ttl_minutes,
            pbkdf2_iterations: cfg.security.pbkdf2_iterations,
            jwt: jwt_config.clone(),
        },
    ));
    let reservations = Arc::new(ReservationService::new(Arc::clone(&repos)));
    let payments = Arc::new(PaymentService::new(Arc::clone(&repos)));

    // Shutdown coordination
    let coordinator = ShutdownCoordinator::new(cfg.server.shutdown_timeout);
    coordinator.start_signal_listener();
    let shutdown = coordinator.signal();

    // Background task: auto-cancel stale pending bookings
    start_booking_expiry_task(
        Arc::clone(&repos),
        shutdown.clone(),
        cfg.booking.expiry_check_interval_secs,
        cfg.booking.pending_ttl_minutes,
    );

    let state = AppState {
        repos,
        registration,
        reservations,
        payments,
        auth: AuthState { jwt_config },
        token_expiration_hours: cfg.security.jwt_expiration_hours,
        started_at: Arc::new(Instant::now()),
    };
    let app = evslot::create_api_router(state);

    let addr = cfg.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 REST API listening on http://{}", addr);
    info!("📖 Swagger UI available at http://{}/docs", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
        })
        .await?;

    info!("🧹 Cleaning up...");
    if let Err(e) = db.close().await {
        error!("Error closing database connection: {}", e);
    }

    info!("👋 EVSlot Booking Service stopped");
    Ok(())
}
