use actix_web::web;

pub mod aliases;
pub mod health;

/// Register every application route.
///
/// Middleware is applied by the caller (`main.rs`, test app builder) so
/// the same table is used in both.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.configure(aliases::configure_routes);
}
