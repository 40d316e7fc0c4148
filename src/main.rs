use std::net::SocketAddr;

use talentflow::chaos::Chaos;
use talentflow::config::Config;
use talentflow::dataset::Dataset;
use talentflow::store::DurableStore;
use talentflow::{routes, seed, AppState};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;

    let store = DurableStore::open(&config.database_path).await?;

    let dataset = Dataset::default();
    seed::seed_dataset(&dataset, &config).await;
    info!(
        jobs = config.seed_jobs,
        candidates = config.seed_candidates,
        "session dataset seeded"
    );

    let chaos = Chaos::new(&config);
    let app_state = AppState::new(dataset, store, chaos);

    let app = routes::router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
