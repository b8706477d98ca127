use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::repos::aliases::AliasStore;
use crate::sso::PermissionProvider;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Alias storage (pooled, safe for concurrent use)
    pub store: Arc<dyn AliasStore>,
    /// Remote "is this user an admin" check
    pub permissions: Arc<dyn PermissionProvider>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Length of server-generated aliases
    pub alias_length: usize,
    /// Raw connection, kept for health checks and shutdown (absent in tests)
    pub db: Option<Arc<DatabaseConnection>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AliasStore>,
        permissions: Arc<dyn PermissionProvider>,
        security: SecurityConfig,
        alias_length: usize,
    ) -> Self {
        Self {
            store,
            permissions,
            security,
            alias_length,
            db: None,
        }
    }

    pub fn with_db(mut self, db: Arc<DatabaseConnection>) -> Self {
        self.db = Some(db);
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }
}
