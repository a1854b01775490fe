// src/services/short_key.rs - Business logic
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use validator::Validate;

use crate::config::TokenConfig;
use crate::errors::ServiceError;
use crate::models::{EncodeUrlDto, Mapping};
use crate::stores::MappingStore;
use crate::utils::{base62, token};

type Result<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait ShortKeyServiceTrait: Send + Sync {
    /// Encodes a URL into a short token, creating a mapping on first use.
    ///
    /// Encoding is idempotent: the same URL always yields the same token,
    /// including under concurrent calls.
    async fn encode(&self, dto: EncodeUrlDto) -> Result<String>;

    /// Resolves a short token back to its original URL.
    ///
    /// A miss is a normal outcome and comes back as `Ok(None)`, distinct
    /// from store failures which surface as errors.
    async fn decode(&self, token: &str) -> Result<Option<String>>;
}

pub struct ShortKeyService<S: MappingStore> {
    store: Arc<S>,
    token_config: TokenConfig,
}

impl<S: MappingStore> ShortKeyService<S> {
    pub fn new(store: Arc<S>, token_config: TokenConfig) -> Self {
        Self {
            store,
            token_config,
        }
    }

    fn is_well_formed_token(&self, candidate: &str) -> bool {
        candidate.len() <= self.token_config.max_length && base62::is_base62(candidate)
    }
}

#[async_trait]
impl<S: MappingStore> ShortKeyServiceTrait for ShortKeyService<S> {
    async fn encode(&self, dto: EncodeUrlDto) -> Result<String> {
        if let Err(e) = dto.validate() {
            return Err(ServiceError::Validation(e.to_string()));
        }
        let url = dto.url;

        // Encoding the same URL twice must return the same token
        if let Some(existing) = self.store.find_by_url(&url).await? {
            return Ok(existing.short_token);
        }

        let mut length = self.token_config.length;

        loop {
            for _ in 0..self.token_config.max_retries {
                let candidate = token::generate_token(length);

                if self.store.find_by_token(&candidate).await?.is_some() {
                    debug!("Token '{}' already taken, redrawing", candidate);
                    continue;
                }

                let mapping = Mapping::new(url.clone(), candidate.clone());
                if self.store.insert_if_absent(&mapping).await? {
                    info!("Created mapping '{}' -> '{}'", candidate, mapping.original_url);
                    return Ok(candidate);
                }

                // Lost a race: either another caller stored this URL first,
                // or the token got taken between the check and the insert.
                // Converge on the winner's token for the same-URL case and
                // redraw otherwise.
                if let Some(existing) = self.store.find_by_url(&url).await? {
                    return Ok(existing.short_token);
                }
                debug!("Token '{}' raced with a concurrent insert, redrawing", candidate);
            }

            if length >= self.token_config.max_length {
                return Err(ServiceError::KeyspaceExhausted(length));
            }

            let widened = (length + 2).min(self.token_config.max_length);
            warn!(
                "Exhausted {} draws at token length {}, widening to {}",
                self.token_config.max_retries, length, widened
            );
            length = widened;
        }
    }

    async fn decode(&self, token: &str) -> Result<Option<String>> {
        if !self.is_well_formed_token(token) {
            return Err(ServiceError::Validation(format!(
                "'{}' is not a well-formed short token",
                token
            )));
        }

        Ok(self
            .store
            .find_by_token(token)
            .await?
            .map(|mapping| mapping.original_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::stores::{MemoryMappingStore, MockMappingStore};
    use mockall::predicate::eq;
    use mockall::Sequence;

    const URL: &str = "https://example.com/a?x=1";

    fn dto(url: &str) -> EncodeUrlDto {
        EncodeUrlDto {
            url: url.to_string(),
        }
    }

    fn service(store: MockMappingStore) -> ShortKeyService<MockMappingStore> {
        ShortKeyService::new(Arc::new(store), TokenConfig::default())
    }

    #[tokio::test]
    async fn test_encode_rejects_invalid_url() {
        // The store must never be touched for malformed input
        let store = MockMappingStore::new();
        let service = service(store);

        let result = service.encode(dto("not-a-url")).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_encode_inserts_new_mapping() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .with(eq(URL))
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_find_by_token()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(true));

        let token = service(store).encode(dto(URL)).await.unwrap();
        assert_eq!(token.len(), 6);
        assert!(base62::is_base62(&token));
    }

    #[tokio::test]
    async fn test_encode_is_idempotent_for_known_url() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .with(eq(URL))
            .times(1)
            .returning(|url| Ok(Some(Mapping::new(url.to_string(), "abc123".to_string()))));
        // No token draw, no insert

        let token = service(store).encode(dto(URL)).await.unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_encode_redraws_on_token_collision() {
        let mut seq = Sequence::new();
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        // First draw is taken, second is free
        store
            .expect_find_by_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|t| Ok(Some(Mapping::new("https://other.example".to_string(), t.to_string()))));
        store
            .expect_find_by_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_insert_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let token = service(store).encode(dto(URL)).await.unwrap();
        assert_eq!(token.len(), 6);
    }

    #[tokio::test]
    async fn test_encode_converges_when_racing_insert_wins() {
        let mut seq = Sequence::new();
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        store
            .expect_find_by_token()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        // The insert loses to a concurrent encode of the same URL
        store
            .expect_insert_if_absent()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        store
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|url| Ok(Some(Mapping::new(url.to_string(), "winner".to_string()))));

        let token = service(store).encode(dto(URL)).await.unwrap();
        assert_eq!(token, "winner");
    }

    #[tokio::test]
    async fn test_encode_widens_token_then_gives_up() {
        let config = TokenConfig {
            length: 6,
            max_length: 8,
            max_retries: 2,
        };

        let mut store = MockMappingStore::new();
        store.expect_find_by_url().times(1).returning(|_| Ok(None));
        // Every candidate is taken: 2 draws at length 6, 2 at length 8
        store
            .expect_find_by_token()
            .times(4)
            .withf(|t| t.len() == 6 || t.len() == 8)
            .returning(|t| {
                Ok(Some(Mapping::new("https://other.example".to_string(), t.to_string())))
            });

        let service = ShortKeyService::new(Arc::new(store), config);
        let result = service.encode(dto(URL)).await;
        assert!(matches!(result, Err(ServiceError::KeyspaceExhausted(8))));
    }

    #[tokio::test]
    async fn test_encode_surfaces_store_unavailability() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_url()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));

        let result = service(store).encode(dto(URL)).await;
        assert!(matches!(
            result,
            Err(ServiceError::Store(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_decode_miss_is_none_not_error() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_token()
            .with(eq("zzzzzz"))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(store).decode("zzzzzz").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_decode_hit_returns_original_url() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_token()
            .with(eq("abc123"))
            .times(1)
            .returning(|t| Ok(Some(Mapping::new(URL.to_string(), t.to_string()))));

        let result = service(store).decode("abc123").await.unwrap();
        assert_eq!(result.as_deref(), Some(URL));
    }

    #[tokio::test]
    async fn test_decode_rejects_malformed_tokens() {
        let store = MockMappingStore::new();
        let service = service(store);

        for bad in ["", "has-dash", "way_too_long_for_any_config", "spa ce"] {
            let result = service.decode(bad).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))), "{:?}", bad);
        }
    }

    #[tokio::test]
    async fn test_encode_then_decode_round_trip() {
        let store = Arc::new(MemoryMappingStore::new());
        let service = ShortKeyService::new(store, TokenConfig::default());

        let token = service.encode(dto(URL)).await.unwrap();
        assert_eq!(token.len(), 6);

        // Encoding again returns the identical token
        let again = service.encode(dto(URL)).await.unwrap();
        assert_eq!(again, token);

        let url = service.decode(&token).await.unwrap();
        assert_eq!(url.as_deref(), Some(URL));

        // A well-formed but unallocated token decodes to nothing
        assert!(service.decode("zzzzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_encodes_of_same_url_return_one_token() {
        let store = Arc::new(MemoryMappingStore::new());
        let service = Arc::new(ShortKeyService::new(store.clone(), TokenConfig::default()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.encode(dto(URL)).await.unwrap()
            }));
        }

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap());
        }

        tokens.dedup();
        assert_eq!(tokens.len(), 1, "concurrent encodes diverged: {:?}", tokens);
        assert_eq!(store.len().await, 1);
    }
}
