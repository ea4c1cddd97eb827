//! Cache key scheme for user data.

use sha2::{Digest, Sha256};

use crate::config::{CACHE_KEY_ALL_USERS, CACHE_PREFIX_USER, CACHE_PREFIX_USER_EMAIL};
use crate::domain::normalize_email;

/// Key holding the full user list.
pub const ALL_USERS_KEY: &str = CACHE_KEY_ALL_USERS;

/// `user:<id>`
pub fn user_key(id: i32) -> String {
    format!("{}{}", CACHE_PREFIX_USER, id)
}

/// `user:email:<sha256 of the normalized email>`
///
/// Hashing bounds the key length and keeps arbitrary characters out of keys.
pub fn user_email_key(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_email(email).as_bytes());

    format!("{}{:x}", CACHE_PREFIX_USER_EMAIL, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefixes() {
        assert_eq!(user_key(1), "user:1");
        assert_eq!(ALL_USERS_KEY, "users:all");
        assert!(user_email_key("ann@x.com").starts_with("user:email:"));
    }

    #[test]
    fn test_email_key_is_fixed_length_hex() {
        let key = user_email_key("someone+tag/with spaces@example.com");
        let digest = key.trim_start_matches("user:email:");

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_email_key_ignores_case_and_whitespace() {
        assert_eq!(user_email_key("Ann@X.com "), user_email_key("ann@x.com"));
        assert_ne!(user_email_key("ann@x.com"), user_email_key("ann2@x.com"));
    }

    #[test]
    fn test_email_key_never_contains_address() {
        assert!(!user_email_key("ann@x.com").contains("ann"));
    }
}
