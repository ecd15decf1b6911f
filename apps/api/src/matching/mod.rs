// Resume-to-job matching engine.
// Factor scorers, aggregation and ranking are pure and synchronous; handlers and the
// job catalog are the only async pieces.

pub mod aggregate;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod education;
pub mod engine;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod recommendations;
pub mod skills;
pub mod taxonomy;
