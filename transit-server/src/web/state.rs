//! Application state for the web layer.

use std::sync::Arc;

use crate::client::CachedRouteClient;
use crate::estimate::TripEstimator;
use crate::graph::TransitGraph;
use crate::planner::SearchConfig;
use crate::stops::StopCatalog;

/// Where route searches are answered.
#[derive(Clone)]
pub enum RouteSource {
    /// Plan on the in-memory transit graph.
    Local {
        graph: Arc<TransitGraph>,
        config: Arc<SearchConfig>,
    },

    /// Forward to a remote backend.
    Remote(Arc<CachedRouteClient>),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Stops users may pick from
    pub catalog: Arc<StopCatalog>,

    pub estimator: Arc<TripEstimator>,

    pub routes: RouteSource,
}

impl AppState {
    /// State that plans routes locally.
    pub fn local(
        catalog: StopCatalog,
        estimator: TripEstimator,
        graph: TransitGraph,
        config: SearchConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            estimator: Arc::new(estimator),
            routes: RouteSource::Local {
                graph: Arc::new(graph),
                config: Arc::new(config),
            },
        }
    }

    /// State that forwards route searches to a backend.
    pub fn remote(catalog: StopCatalog, estimator: TripEstimator, client: CachedRouteClient) -> Self {
        Self {
            catalog: Arc::new(catalog),
            estimator: Arc::new(estimator),
            routes: RouteSource::Remote(Arc::new(client)),
        }
    }
}
