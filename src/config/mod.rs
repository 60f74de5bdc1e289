/// Database connection and table creation
pub mod database;

/// Application settings from the optional `bbm.toml`
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};
