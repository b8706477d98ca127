//! Alias storage capabilities.
//!
//! Each handler depends on the narrowest trait it needs; `AliasStore`
//! bundles them for wiring into `AppState`.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::url_alias_sea as alias_adapter;
use crate::entities::url_alias;
use crate::errors::domain::{DomainError, NotFoundKind};

/// A stored alias -> URL mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub id: Uuid,
    pub url: String,
    pub alias: String,
}

impl From<url_alias::Model> for AliasRecord {
    fn from(model: url_alias::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            alias: model.alias,
        }
    }
}

#[async_trait]
pub trait AliasSaver: Send + Sync {
    /// Fails with `ConflictKind::AliasExists` when the alias is taken.
    async fn save_alias(&self, url: &str, alias: &str) -> Result<(), DomainError>;
}

#[async_trait]
pub trait UrlGetter: Send + Sync {
    /// Fails with `NotFoundKind::Alias` when nothing is stored under `alias`.
    async fn get_url(&self, alias: &str) -> Result<String, DomainError>;
}

#[async_trait]
pub trait AliasDeleter: Send + Sync {
    /// Deleting an alias that does not exist is not an error.
    async fn delete_alias(&self, alias: &str) -> Result<(), DomainError>;
}

#[async_trait]
pub trait AliasListGetter: Send + Sync {
    async fn list_aliases(&self) -> Result<Vec<AliasRecord>, DomainError>;
}

pub trait AliasStore: AliasSaver + UrlGetter + AliasDeleter + AliasListGetter {}

impl<T> AliasStore for T where T: AliasSaver + UrlGetter + AliasDeleter + AliasListGetter + ?Sized {}

/// PostgreSQL-backed store
///
/// Shares the pooled connection with `AppState`, which keeps a handle for
/// health checks and shutdown.
#[derive(Debug, Clone)]
pub struct SeaAliasStore {
    conn: Arc<DatabaseConnection>,
}

impl SeaAliasStore {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AliasSaver for SeaAliasStore {
    async fn save_alias(&self, url: &str, alias: &str) -> Result<(), DomainError> {
        alias_adapter::insert(self.conn.as_ref(), url, alias).await?;
        Ok(())
    }
}

#[async_trait]
impl UrlGetter for SeaAliasStore {
    async fn get_url(&self, alias: &str) -> Result<String, DomainError> {
        alias_adapter::find_by_alias(self.conn.as_ref(), alias)
            .await?
            .map(|row| row.url)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Alias, format!("alias {alias}")))
    }
}

#[async_trait]
impl AliasDeleter for SeaAliasStore {
    async fn delete_alias(&self, alias: &str) -> Result<(), DomainError> {
        alias_adapter::delete_by_alias(self.conn.as_ref(), alias).await?;
        Ok(())
    }
}

#[async_trait]
impl AliasListGetter for SeaAliasStore {
    async fn list_aliases(&self) -> Result<Vec<AliasRecord>, DomainError> {
        let rows = alias_adapter::list_all(self.conn.as_ref()).await?;
        Ok(rows.into_iter().map(AliasRecord::from).collect())
    }
}
