//! Alias endpoints.
//!
//! `save` and `delete` require an admin; listing and redirecting are open.
//! The authorization check always runs before the body or query is read.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::AuthorizationOutcome;
use crate::error::AppError;
use crate::http::request::{decode, read_body, SaveRequest, INVALID_REQUEST, MAX_BODY_BYTES};
use crate::http::ApiResponse;
use crate::services::aliases as alias_service;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
struct DeleteQuery {
    #[serde(default)]
    alias: Option<String>,
}

async fn save(
    req: HttpRequest,
    outcome: AuthorizationOutcome,
    payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    outcome.require_admin()?;

    let body = read_body(payload, MAX_BODY_BYTES).await?;

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let request = decode::<SaveRequest>(&body, content_type)?.validate()?;

    alias_service::save(
        app_state.store.as_ref(),
        request,
        app_state.alias_length,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

async fn delete(
    req: HttpRequest,
    outcome: AuthorizationOutcome,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    outcome.require_admin()?;

    let alias = web::Query::<DeleteQuery>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().alias)
        .filter(|alias| !alias.is_empty())
        .ok_or_else(|| AppError::bad_request(INVALID_REQUEST))?;

    alias_service::delete(app_state.store.as_ref(), &alias).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let records = alias_service::list(app_state.store.as_ref()).await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn redirect(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();
    let url = alias_service::resolve(app_state.store.as_ref(), &alias).await?;
    let location = HeaderValue::from_str(&url).map_err(|e| {
        AppError::internal(format!("stored url for alias {alias} is not a valid header: {e}"))
    })?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(list)))
        .service(web::resource("/save").route(web::post().to(save)))
        .service(web::resource("/del").route(web::get().to(delete)))
        .service(web::resource("/{alias}").route(web::get().to(redirect)));
}
