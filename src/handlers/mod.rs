mod mapping;

pub use mapping::{decode_handler, encode_handler, redirect_handler};
