use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::app::DEFAULT_ALIAS_LENGTH;
use crate::error::AppError;
use crate::repos::aliases::{AliasStore, SeaAliasStore};
use crate::sso::PermissionProvider;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    alias_length: usize,
    db: Option<Arc<DatabaseConnection>>,
    store: Option<Arc<dyn AliasStore>>,
    permissions: Option<Arc<dyn PermissionProvider>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            alias_length: DEFAULT_ALIAS_LENGTH,
            db: None,
            store: None,
            permissions: None,
        }
    }

    /// Use a database connection; also backs the alias store unless one
    /// is set explicitly.
    pub fn with_db(mut self, db: Arc<DatabaseConnection>) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn AliasStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionProvider>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_alias_length(mut self, alias_length: usize) -> Self {
        self.alias_length = alias_length;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("security config is required"))?;
        let permissions = self
            .permissions
            .ok_or_else(|| AppError::config("permission provider is required"))?;

        let store: Arc<dyn AliasStore> = match (self.store, &self.db) {
            (Some(store), _) => store,
            (None, Some(db)) => Arc::new(SeaAliasStore::new(Arc::clone(db))),
            (None, None) => return Err(AppError::config("alias store or database is required")),
        };

        let state = AppState::new(store, permissions, security, self.alias_length);
        Ok(match self.db {
            Some(db) => state.with_db(db),
            None => state,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
