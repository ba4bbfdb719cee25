//! Transit trip planner server.
//!
//! Answers three questions for a city bus and metro network: which
//! services get me from here to there, how long will it take and what
//! will it cost, and which stop did I mean while typing.

pub mod client;
pub mod config;
pub mod domain;
pub mod estimate;
pub mod graph;
pub mod logging;
pub mod normalize;
pub mod planner;
pub mod stops;
pub mod web;
