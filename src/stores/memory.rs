// src/stores/memory.rs - Process-memory mapping store
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::MappingStore;
use crate::errors::StoreError;
use crate::models::Mapping;

type Result<T> = std::result::Result<T, StoreError>;

#[derive(Default)]
struct Tables {
    by_url: HashMap<String, Mapping>,
    by_token: HashMap<String, Mapping>,
}

/// In-memory mapping store.
///
/// Both lookup directions live behind a single lock, so `insert_if_absent`
/// checks and updates them as one atomic step. The instance owns all of its
/// records; dropping it drops the mappings.
#[derive(Default)]
pub struct MemoryMappingStore {
    tables: RwLock<Tables>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live mappings
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_token.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<Mapping>> {
        let tables = self.tables.read().await;
        Ok(tables.by_url.get(url).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>> {
        let tables = self.tables.read().await;
        Ok(tables.by_token.get(token).cloned())
    }

    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<bool> {
        let mut tables = self.tables.write().await;

        if tables.by_url.contains_key(&mapping.original_url)
            || tables.by_token.contains_key(&mapping.short_token)
        {
            return Ok(false);
        }

        tables
            .by_url
            .insert(mapping.original_url.clone(), mapping.clone());
        tables
            .by_token
            .insert(mapping.short_token.clone(), mapping.clone());

        Ok(true)
    }
}
