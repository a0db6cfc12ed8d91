//! Base 36 codes for recipe short links.

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn encode(id: i32) -> String {
    let mut n = id.unsigned_abs();
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// `None` for empty input, non-base36 characters, overflow or non-positive ids.
pub fn decode(code: &str) -> Option<i32> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let value = i64::from_str_radix(&code.to_ascii_lowercase(), 36).ok()?;
    i32::try_from(value).ok().filter(|id| *id > 0)
}
