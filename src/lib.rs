pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod types;
