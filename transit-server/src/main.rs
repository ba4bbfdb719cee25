use std::error::Error;

use tracing::{error, info};

use transit_server::client::{CacheConfig, CachedRouteClient, RouteClient};
use transit_server::config::ServerConfig;
use transit_server::estimate::TripEstimator;
use transit_server::graph::TransitGraph;
use transit_server::logging::init_logger;
use transit_server::planner::SearchConfig;
use transit_server::stops::StopCatalog;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    init_logger();

    if let Err(e) = run().await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    // Load the network (fail fast if unavailable)
    let graph = TransitGraph::load(&config.graph_path)?;
    info!(
        path = %config.graph_path.display(),
        stops = graph.stop_count(),
        edges = graph.edge_count(),
        "loaded transit graph"
    );

    let catalog = match &config.catalog_path {
        Some(path) => StopCatalog::load(path)?,
        None => StopCatalog::from_names(graph.stop_names()),
    };
    info!(stops = catalog.len(), "loaded stop catalog");

    let estimator = TripEstimator::default();

    let state = match config.backend.clone() {
        Some(backend) => {
            info!(url = %backend.base_url, "forwarding route searches to backend");
            let client = RouteClient::new(backend)?;
            let cached = CachedRouteClient::new(client, &CacheConfig::default());
            AppState::remote(catalog, estimator, cached)
        }
        None => AppState::local(catalog, estimator, graph, SearchConfig::default()),
    };

    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "transit planner listening");
    info!("  GET  /health");
    info!("  POST /api/routes/find");
    info!("  GET  /api/stops/suggest");
    info!("  POST /api/trips/estimate");

    axum::serve(listener, app).await?;
    Ok(())
}
