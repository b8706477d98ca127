//! In-memory alias store with the same contract as the Postgres one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use url_shortener::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use url_shortener::repos::aliases::{
    AliasDeleter, AliasListGetter, AliasRecord, AliasSaver, UrlGetter,
};
use uuid::Uuid;

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<BTreeMap<String, AliasRecord>>,
    fail: AtomicBool,
    writes: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails with an infrastructure error
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Number of save/delete calls that reached the store
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn insert(&self, alias: &str, url: &str) {
        self.rows.lock().unwrap().insert(
            alias.to_string(),
            AliasRecord {
                id: Uuid::new_v4(),
                url: url.to_string(),
                alias: alias.to_string(),
            },
        );
    }

    pub fn url_of(&self, alias: &str) -> Option<String> {
        self.rows.lock().unwrap().get(alias).map(|r| r.url.clone())
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "Database unavailable",
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AliasSaver for FakeStore {
    async fn save_alias(&self, url: &str, alias: &str) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(alias) {
            return Err(DomainError::conflict(
                ConflictKind::AliasExists,
                "alias already exists",
            ));
        }
        rows.insert(
            alias.to_string(),
            AliasRecord {
                id: Uuid::new_v4(),
                url: url.to_string(),
                alias: alias.to_string(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl UrlGetter for FakeStore {
    async fn get_url(&self, alias: &str) -> Result<String, DomainError> {
        self.check()?;
        self.url_of(alias)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Alias, format!("alias {alias}")))
    }
}

#[async_trait]
impl AliasDeleter for FakeStore {
    async fn delete_alias(&self, alias: &str) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().remove(alias);
        Ok(())
    }
}

#[async_trait]
impl AliasListGetter for FakeStore {
    async fn list_aliases(&self) -> Result<Vec<AliasRecord>, DomainError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}
