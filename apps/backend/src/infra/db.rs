use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::config::DbConfig;
use crate::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the connection pool and verify the server answers.
///
/// Does not run migrations; those are applied with the migration CLI.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(cfg.url());
    options
        .connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let conn = Database::connect(options).await.map_err(|e| {
        AppError::config(format!(
            "failed to connect to {}: {}",
            cfg.display_url(),
            crate::logging::pii::redact(&e.to_string())
        ))
    })?;

    ping(&conn).await?;
    info!(database = %cfg.display_url(), "database connected");
    Ok(conn)
}

/// Round-trip a trivial query.
pub async fn ping(conn: &DatabaseConnection) -> Result<(), AppError> {
    conn.query_one(Statement::from_string(
        conn.get_database_backend(),
        "SELECT 1 AS health_check".to_string(),
    ))
    .await
    .map(|_| ())
    .map_err(|e| AppError::internal(format!("database ping failed: {e}")))
}
