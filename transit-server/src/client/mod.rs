//! Client for a remote route-search backend.
//!
//! The backend answers `POST {base}/routes/find` with direct and combined
//! routes. Responses are normalized before they leave this module, and
//! [`CachedRouteClient`] keeps recent answers in memory.

mod cache;
mod client;
mod error;

pub use cache::{CacheConfig, CachedRouteClient};
pub use client::{RouteClient, RouteClientConfig};
pub use error::ClientError;
