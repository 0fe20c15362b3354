use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_intake::config::Config;
use lead_intake::db::Database;
use lead_intake::db_storage::PgStore;
use lead_intake::directory::AccountDirectory;
use lead_intake::handlers::AppState;
use lead_intake::intake::LeadIntake;
use lead_intake::routes;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration once, connects to Postgres
/// (running migrations), wires the account directory and intake pipeline,
/// then serves the API with per-IP rate limiting on admin and lead routes.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intake=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established, migrations applied");

    let store = Arc::new(PgStore::new(db.pool.clone()));
    let directory = AccountDirectory::new(store.clone());
    let intake = LeadIntake::new(directory.clone(), store, config.format_policy);

    let app_state = Arc::new(AppState {
        config: config.clone(),
        directory,
        intake,
    });

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    let api = routes::api_routes().layer(GovernorLayer {
        config: governor_conf,
    });
    let app = routes::build_router(app_state, api);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
