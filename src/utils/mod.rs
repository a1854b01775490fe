pub mod base62;
pub mod token;
