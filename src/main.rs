use anyhow::Result;
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trailhead_core::application::services::{ApplicationServices, Collaborators, Repositories};
use trailhead_core::config::AppConfig;
use trailhead_core::infrastructure::{
    database,
    repositories::{
        PostgresBlogPostRepository, PostgresBookingRepository, PostgresBusinessRepository,
        PostgresDepartureRepository, PostgresDestinationRepository, PostgresEventRepository,
        PostgresPackageRepository, PostgresRecordLookup, PostgresRegistrationRepository,
        PostgresReviewRepository, PostgresSavedItemRepository, PostgresSlugRepository,
        PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use trailhead_core::presentation::http::{
    routes::{RouterConfig, build_router},
    state::HttpState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.db_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let services = Arc::new(ApplicationServices::new(
        repositories(&pool),
        collaborators(&config)?,
    ));
    let state = HttpState { services };

    let app = build_router(
        state,
        RouterConfig {
            allowed_origins: config.allowed_origins().to_vec(),
            rate_limit: Some((config.rate_limit_per_second(), config.rate_limit_burst())),
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn repositories(pool: &PgPool) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        posts: Arc::new(PostgresBlogPostRepository::new(pool.clone())),
        packages: Arc::new(PostgresPackageRepository::new(pool.clone())),
        departures: Arc::new(PostgresDepartureRepository::new(pool.clone())),
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        registrations: Arc::new(PostgresRegistrationRepository::new(pool.clone())),
        destinations: Arc::new(PostgresDestinationRepository::new(pool.clone())),
        businesses: Arc::new(PostgresBusinessRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        reviews: Arc::new(PostgresReviewRepository::new(pool.clone())),
        saved: Arc::new(PostgresSavedItemRepository::new(pool.clone())),
        slugs: Arc::new(PostgresSlugRepository::new(pool.clone())),
        records: Arc::new(PostgresRecordLookup::new(pool.clone())),
    }
}

fn collaborators(config: &AppConfig) -> Result<Collaborators> {
    let token_manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;
    Ok(Collaborators {
        password_hasher: Arc::new(Argon2PasswordHasher),
        token_manager: Arc::new(token_manager),
        clock: Arc::new(SystemClock),
        slugger: Arc::new(DefaultSlugGenerator),
        slug_max_attempts: config.slug_max_attempts(),
    })
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
