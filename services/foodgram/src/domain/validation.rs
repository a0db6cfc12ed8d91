//! Field rules for users and recipes.

use std::collections::BTreeMap;
use std::hash::Hash;

pub const EMAIL_MAX_LEN: usize = 254;
pub const NAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const RECIPE_NAME_MAX_LEN: usize = 256;
pub const COOKING_TIME_MIN: i32 = 1;
pub const AMOUNT_MIN: i32 = 1;

/// Usernames: 1-150 chars of letters, digits and `@ . + - _`. `me` is reserved
/// because `/users/me` is a route.
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.chars().count() > NAME_MAX_LEN {
        return false;
    }
    if username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain, no spaces.
pub fn validate_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split('.')
            .all(|label| !label.is_empty())
        && domain.contains('.')
}

/// Person name fields: non-blank, at most 150 chars.
pub fn validate_person_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= NAME_MAX_LEN
}

/// Password policy; returns the reason a password is rejected.
pub fn password_problem(password: &str, username: &str, email: &str) -> Option<&'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some("password must contain at least 8 characters");
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Some("password must not be entirely numeric");
    }
    let lowered = password.to_lowercase();
    if lowered == username.to_lowercase() || lowered == email.to_lowercase() {
        return Some("password is too similar to the username or email");
    }
    None
}

/// Values occurring more than once, in ascending order.
pub fn find_duplicates<T>(items: &[T]) -> Vec<T>
where
    T: Ord + Hash + Copy,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(*item).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(item, _)| item)
        .collect()
}
