/// Application settings loading from config.toml
pub mod app;

/// Database schema setup for the SQL backend
pub mod database;

/// Store credentials from environment variables
pub mod store;

pub use app::{AppConfig, load_config, load_default_config};
pub use store::{EndpointKind, StoreCredentials};
