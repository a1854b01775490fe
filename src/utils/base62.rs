use rand::{rng, Rng};

/// Alphabet used for short tokens (0-9, A-Z, a-z)
pub const TOKEN_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = 62;

/// Converts a number to its base62 representation
pub fn encode_base62(mut num: u64) -> String {
    if num == 0 {
        return "0".to_string();
    }

    let mut result = Vec::new();

    while num > 0 {
        result.push(TOKEN_ALPHABET[(num % BASE) as usize]);
        num /= BASE;
    }

    // Reverse and convert to string
    result.reverse();
    String::from_utf8(result).unwrap()
}

/// Generates a random character from the token alphabet
pub fn random_base62_char() -> char {
    let idx = rng().random_range(0..TOKEN_ALPHABET.len());
    TOKEN_ALPHABET[idx] as char
}

/// Checks whether every character of `s` belongs to the token alphabet
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| TOKEN_ALPHABET.contains(&b))
}
