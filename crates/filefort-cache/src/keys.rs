//! Cache key builders for all FileFort cache entries.

use uuid::Uuid;

/// Key holding the single active token of `user_id`.
///
/// The key is the prefix immediately followed by the hyphenated id, with
/// no separator.
pub fn active_session(prefix: &str, user_id: Uuid) -> String {
    format!("{prefix}{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_prefix_plus_id() {
        let id = Uuid::nil();
        assert_eq!(
            active_session("file-fort-active-jwt-clients", id),
            "file-fort-active-jwt-clients00000000-0000-0000-0000-000000000000"
        );
    }
}
