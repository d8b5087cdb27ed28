//! Identifier generation for rows, cells and tables.

use uuid::Uuid;

/// Generate a random, unique identifier (UUID v4, hyphenated).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fill `id` with a generated identifier if it is empty.
///
/// Returns `true` if a new identifier was generated.
pub(crate) fn ensure_id(id: &mut String) -> bool {
    if id.is_empty() {
        *id = generate_id();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_ensure_id_keeps_existing() {
        let mut id = "row-1".to_string();
        assert!(!ensure_id(&mut id));
        assert_eq!(id, "row-1");

        let mut empty = String::new();
        assert!(ensure_id(&mut empty));
        assert!(!empty.is_empty());
    }
}
