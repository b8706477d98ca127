use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{debug, error, info};
use url_shortener::config::AppConfig;
use url_shortener::infra::db::connect_db;
use url_shortener::infra::state::build_state;
use url_shortener::middleware::{Authorization, RequestTrace, StructuredLogger, TraceSpan};
use url_shortener::routes;
use url_shortener::sso::{RetryPolicy, SsoClient};
use url_shortener::state::security_config::SecurityConfig;
use url_shortener::telemetry;

/// Grace period for in-flight requests after a stop signal
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.env);
    info!(env = %config.env, "starting url-shortener");
    debug!("debug messages are enabled");

    let db = match connect_db(&config.db).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!(error = %e, "failed to init storage");
            std::process::exit(1);
        }
    };

    let policy = RetryPolicy::new(config.sso.retries_count, config.sso.timeout);
    let sso = match SsoClient::connect_lazy(&config.sso.address, policy) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to init sso client");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(Arc::clone(&db))
        .with_permissions(Arc::new(sso))
        .with_security(SecurityConfig::new(config.jwt_secret.expose().as_bytes()))
        .with_alias_length(config.alias_length)
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Authorization)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .client_request_timeout(config.http_server.timeout)
    .keep_alive(config.http_server.idle_timeout)
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(config.http_server.address.as_str())?
    .run();

    info!(address = %config.http_server.address, "server started");
    let result = server.await;
    info!("server stopped");

    // Worker app factories may still hold state; the pool then closes on drop.
    match Arc::try_unwrap(db) {
        Ok(db) => match db.close().await {
            Ok(()) => info!("storage closed"),
            Err(e) => error!(error = %e, "failed to close database"),
        },
        Err(_) => debug!("storage still shared at shutdown; released on drop"),
    }

    result
}
