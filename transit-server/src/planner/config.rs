//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of service changes allowed.
    pub max_transfers: usize,

    /// Maximum number of combined routes to return.
    pub max_results: usize,

    /// Upper bound on BFS states examined per search.
    /// Keeps dense city graphs from exploding.
    pub max_explored: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_transfers: usize, max_results: usize, max_explored: usize) -> Self {
        Self {
            max_transfers,
            max_results,
            max_explored,
        }
    }

    /// Set the maximum number of combined routes returned.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 5,
            max_results: 5,
            max_explored: 500_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_transfers, 5);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.max_explored, 500_000);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(2, 3, 1000).with_max_results(8);

        assert_eq!(config.max_transfers, 2);
        assert_eq!(config.max_results, 8);
        assert_eq!(config.max_explored, 1000);
    }
}
