use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::infra::db::ping;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db_status, db_error, migrations) = match app_state.db() {
        Some(db) => match ping(db).await {
            Ok(()) => {
                let migrations = match get_latest_migration_version(db).await {
                    Ok(Some(version)) => version,
                    Ok(None) => "no_migrations".to_string(),
                    Err(_) => "unknown".to_string(),
                };
                ("ok".to_string(), None, migrations)
            }
            Err(e) => ("error".to_string(), Some(e.to_string()), "unknown".to_string()),
        },
        None => ("not_configured".to_string(), None, "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        app_version,
        db: db_status,
        db_error,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/_health", web::get().to(health));
}
