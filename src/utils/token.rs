use rand::{rng, Rng};

use super::base62::{encode_base62, random_base62_char};

/// Generates a random short token of the given length from the base62 alphabet
pub fn generate_token(length: usize) -> String {
    // Generate a random 64-bit number
    let random_id: u64 = rng().random();

    // Encode it using base62
    let mut encoded = encode_base62(random_id);

    // Ensure the token is of desired length
    // If too short, pad with additional random characters
    while encoded.len() < length {
        encoded.push(random_base62_char());
    }

    // If too long, truncate
    if encoded.len() > length {
        encoded.truncate(length);
    }

    encoded
}
