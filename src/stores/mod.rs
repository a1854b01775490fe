// src/stores/mod.rs - Mapping persistence abstraction
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

mod memory;
mod postgres;

pub use memory::MemoryMappingStore;
pub use postgres::PgMappingStore;

use crate::errors::StoreError;
use crate::models::Mapping;

type Result<T> = std::result::Result<T, StoreError>;

/// Key-value persistence for URL mappings.
///
/// Implementations must keep both directions of the mapping consistent:
/// a record is visible by URL if and only if it is visible by token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Finds a live mapping by its original URL
    ///
    /// ### Errors
    /// * `StoreError::Unavailable` - If the backing store cannot be reached
    async fn find_by_url(&self, url: &str) -> Result<Option<Mapping>>;

    /// Finds a live mapping by its short token
    ///
    /// ### Errors
    /// * `StoreError::Unavailable` - If the backing store cannot be reached
    async fn find_by_token(&self, token: &str) -> Result<Option<Mapping>>;

    /// Inserts a mapping only if neither its URL nor its token conflicts
    /// with an existing record.
    ///
    /// The check and the insert are a single atomic step with respect to
    /// other callers; there is no separate check-then-act window. Returns
    /// `true` if the mapping was inserted, `false` on conflict. A `false`
    /// return leaves the store unchanged.
    ///
    /// ### Errors
    /// * `StoreError::Unavailable` - If the backing store cannot be reached
    async fn insert_if_absent(&self, mapping: &Mapping) -> Result<bool>;
}
