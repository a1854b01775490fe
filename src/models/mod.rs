mod mapping;

pub use mapping::{DecodeUrlQuery, EncodeUrlDto, Mapping};
