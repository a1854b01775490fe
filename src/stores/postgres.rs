// src/stores/postgres.rs - Relational mapping store
use async_trait::async_trait;
use sqlx::PgPool;

use super::MappingStore;
use crate::db::Database;
use crate::errors::StoreError;
use crate::models::Mapping;

type Result<T> = std::result::Result<T, StoreError>;

/// Mapping store backed by a Postgres table.
///
/// Uniqueness of both `original_url` and `short_token` is enforced by
/// unique indexes, and `insert_if_absent` leans on `ON CONFLICT DO NOTHING`
/// so the conflict check happens inside the database.
pub struct PgMappingStore {
    pool: PgPool,
}

impl PgMappingStore {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<Mapping>> {
        sqlx::query_as::<_, Mapping>(
            r#"
            SELECT id, original_url, short_token, created_at
            FROM url_mappings
            WHERE original_url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to look up mapping by URL: {}", e);
            StoreError::from(e)
        })
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>> {
        sqlx::query_as::<_, Mapping>(
            r#"
            SELECT id, original_url, short_token, created_at
            FROM url_mappings
            WHERE short_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to look up mapping by token: {}", e);
            StoreError::from(e)
        })
    }

    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (original_url, short_token, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&mapping.original_url)
        .bind(&mapping.short_token)
        .bind(mapping.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to insert mapping: {}", e);
            StoreError::from(e)
        })?;

        Ok(result.rows_affected() == 1)
    }
}
