pub mod app;
pub mod db;
pub mod sensitive;

pub use app::{AppConfig, ConfigError, Environment, HttpServerConfig, SsoConfig};
pub use db::DbConfig;
pub use sensitive::Sensitive;
