//! Alias use cases.
//!
//! Each function is generic over the one storage capability it needs, so
//! handlers can be exercised against narrow fakes.

use tracing::{error, info};

use crate::error::AppError;
use crate::http::request::ValidSave;
use crate::repos::aliases::{AliasDeleter, AliasListGetter, AliasRecord, AliasSaver, UrlGetter};
use crate::utils::random::random_alias;

/// Caller-facing message for a failed insert
pub const SAVE_FAILED: &str = "failed to add alias";

/// Store a mapping, generating the alias when none was requested.
///
/// Returns the alias the URL was stored under. A generated alias that
/// collides is reported like a requested one; no retry is attempted.
pub async fn save<S>(store: &S, request: ValidSave, alias_length: usize) -> Result<String, AppError>
where
    S: AliasSaver + ?Sized,
{
    let (alias, generated) = match request.alias {
        Some(alias) => (alias, false),
        None => (random_alias(alias_length), true),
    };

    match store.save_alias(&request.url, &alias).await {
        Ok(()) => {
            info!(alias = %alias, generated, "url added");
            Ok(alias)
        }
        Err(e) if e.is_alias_exists() => {
            info!(alias = %alias, generated, "alias already exists");
            Err(e.into())
        }
        Err(e) => {
            error!(alias = %alias, error = %e, "failed to add url");
            Err(AppError::internal_with(SAVE_FAILED, e.to_string()))
        }
    }
}

pub async fn delete<S>(store: &S, alias: &str) -> Result<(), AppError>
where
    S: AliasDeleter + ?Sized,
{
    store.delete_alias(alias).await.map_err(|e| {
        error!(alias = %alias, error = %e, "failed to delete alias");
        AppError::internal(e.to_string())
    })?;
    info!(alias = %alias, "alias deleted");
    Ok(())
}

pub async fn list<S>(store: &S) -> Result<Vec<AliasRecord>, AppError>
where
    S: AliasListGetter + ?Sized,
{
    store.list_aliases().await.map_err(|e| {
        error!(error = %e, "failed to list aliases");
        AppError::internal(e.to_string())
    })
}

/// Look up the target of `alias`.
pub async fn resolve<S>(store: &S, alias: &str) -> Result<String, AppError>
where
    S: UrlGetter + ?Sized,
{
    match store.get_url(alias).await {
        Ok(url) => {
            info!(alias = %alias, url = %url, "got url");
            Ok(url)
        }
        Err(e) if e.is_alias_not_found() => {
            info!(alias = %alias, "url not found");
            Err(e.into())
        }
        Err(e) => {
            error!(alias = %alias, error = %e, "failed to get url");
            Err(AppError::internal(e.to_string()))
        }
    }
}
