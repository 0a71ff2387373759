//! Session token resolution and history key derivation.

use uuid::Uuid;

/// Uses the caller-supplied session id verbatim, or mints a fresh UUID v4
/// when it is absent or blank.
pub(crate) fn resolve_session_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Internal composite history key. Never exposed to callers.
pub(crate) fn composite_key(user_id: &str, session_id: &str) -> String {
    format!("{user_id}_{session_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_session_id_is_used_verbatim() {
        assert_eq!(resolve_session_id(Some("abc-123")), "abc-123");
    }

    #[test]
    fn absent_or_blank_session_id_mints_a_fresh_uuid() {
        let a = resolve_session_id(None);
        let b = resolve_session_id(Some("  "));
        assert!(Uuid::parse_str(&a).is_ok());
        assert!(Uuid::parse_str(&b).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn composite_key_joins_with_underscore() {
        assert_eq!(composite_key("u1", "s9"), "u1_s9");
    }
}
