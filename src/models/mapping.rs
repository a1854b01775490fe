// src/models/mapping.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validations::validate_url;

// DTO for encoding a URL into a short token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EncodeUrlDto {
    #[validate(custom(function = "validate_url"))]
    pub url: String,
}

// Query parameters for the decode endpoint
#[derive(Debug, Deserialize)]
pub struct DecodeUrlQuery {
    pub short_url: String,
}

/// Represents a stored URL-to-token mapping
///
/// A mapping is created on the first encode of a URL and never mutated
/// afterwards.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Mapping {
    /// Record ID assigned by the relational backend (`None` for in-memory records)
    pub id: Option<Uuid>,

    /// The original, long URL that was shortened
    pub original_url: String,

    /// The generated short token that identifies this URL
    pub short_token: String,

    /// When this mapping was created
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(original_url: String, short_token: String) -> Self {
        Self {
            id: None,
            original_url,
            short_token,
            created_at: Utc::now(),
        }
    }
}
