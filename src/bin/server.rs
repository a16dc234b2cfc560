use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use candidate_registry::api::{create_router, AppState};
use candidate_registry::{CandidateService, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candidate_server=debug,candidate_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;

    tracing::info!("🚀 Starting Candidate Registry Server");
    tracing::info!("📦 Database: {}", config.db_path);
    tracing::info!("🔌 Port: {}", config.port);

    let service = CandidateService::with_strategy(&config.db_path, config.ranker).await?;
    let app = create_router(AppState::new(service));

    let addr = config.bind_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
