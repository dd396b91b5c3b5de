use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Clock;
use auth::SystemClock;
use finance_service::config::AuthMode;
use finance_service::config::Config;
use finance_service::domain::access::ports::CredentialIssuer;
use finance_service::domain::access::ports::CredentialVerifier;
use finance_service::domain::access::BearerCredentials;
use finance_service::domain::access::SessionCredentials;
use finance_service::domain::activity::service::ActivityService;
use finance_service::domain::session::ports::SessionStore;
use finance_service::domain::typology::service::TypologyService;
use finance_service::domain::user::service::UserService;
use finance_service::inbound::http::cookies::SessionCookie;
use finance_service::inbound::http::router::create_router;
use finance_service::inbound::http::router::AppState;
use finance_service::outbound::repositories::PostgresActivityRepository;
use finance_service::outbound::repositories::PostgresTypologyRepository;
use finance_service::outbound::repositories::PostgresUserRepository;
use finance_service::outbound::sessions::InMemorySessionStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finance_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "finance-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration, refusing to start");
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        auth_mode = ?config.auth.mode,
        revoke_on_logout = config.jwt.revoke_on_logout,
        "Configuration loaded"
    );

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

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let authenticator = Arc::new(Authenticator::with_clock(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
        Arc::clone(&clock),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let typology_repository = Arc::new(PostgresTypologyRepository::new(pg_pool.clone()));
    let activity_repository = Arc::new(PostgresActivityRepository::new(pg_pool));

    let (verifier, issuer, session_cookie, credential_ttl_hours) = match config.auth.mode {
        AuthMode::Bearer => {
            let credentials = Arc::new(BearerCredentials::new(
                Arc::clone(&authenticator),
                Arc::clone(&user_repository),
                config.jwt.revoke_on_logout,
            ));
            let verifier: Arc<dyn CredentialVerifier> = credentials.clone();
            let issuer: Arc<dyn CredentialIssuer> = credentials;

            (verifier, issuer, None, config.jwt.expiration_hours)
        }
        AuthMode::Session => {
            let sessions = Arc::new(InMemorySessionStore::new());
            spawn_session_purge(
                Arc::clone(&sessions),
                Arc::clone(&clock),
                Duration::from_secs(config.session.purge_interval_seconds.max(1)),
            );

            let credentials = Arc::new(SessionCredentials::new(
                Arc::clone(&user_repository),
                sessions,
                Arc::clone(&clock),
                chrono::Duration::hours(config.session.expiration_hours),
            ));
            let verifier: Arc<dyn CredentialVerifier> = credentials.clone();
            let issuer: Arc<dyn CredentialIssuer> = credentials;
            let cookie = SessionCookie::new(
                config.session.cookie_name.clone(),
                config.session.secret.as_bytes(),
            )?;

            (verifier, issuer, Some(cookie), config.session.expiration_hours)
        }
    };

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
        issuer,
    ));
    let typology_service = Arc::new(TypologyService::new(Arc::clone(&typology_repository)));
    let activity_service = Arc::new(ActivityService::new(
        activity_repository,
        typology_repository,
    ));

    let state = AppState {
        user_service,
        activity_service,
        typology_service,
        verifier,
        session_cookie,
        credential_ttl_hours,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;
    tracing::info!("Server exited");

    Ok(())
}

/// Periodically drop expired sessions so the in-memory store stays bounded.
fn spawn_session_purge(
    sessions: Arc<InMemorySessionStore>,
    clock: Arc<dyn Clock>,
    every: Duration,
) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match sessions.purge_expired(clock.now()).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Expired sessions purged"),
                Err(e) => tracing::error!(error = %e, "Session purge failed"),
            }
        }
    });
}
