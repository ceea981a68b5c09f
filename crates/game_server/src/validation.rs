//! Input validation applied at the HTTP boundary before the index is touched.

use point_index::IndexError;

/// Checks a game or point name against the server's limits.
///
/// Emptiness is checked by the index itself; this adds the length limit and
/// rejects control characters.
pub fn validate_name(kind: &str, name: &str, max_length: usize) -> Result<(), IndexError> {
    if name.len() > max_length {
        return Err(IndexError::InvalidName(format!(
            "{kind} name too long: {} bytes (max {max_length})",
            name.len()
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(IndexError::InvalidName(format!(
            "{kind} name contains control characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_names() {
        assert!(validate_name("point", "paris", 16).is_ok());
        assert!(validate_name("point", "São Paulo", 16).is_ok());
        // Empty names are left to the index.
        assert!(validate_name("point", "", 16).is_ok());
    }

    #[test]
    fn test_rejects_long_names() {
        let name = "a".repeat(17);
        let err = validate_name("point", &name, 16).unwrap_err();
        assert!(matches!(err, IndexError::InvalidName(_)));
        assert!(err.to_string().contains("too long"));
        assert!(validate_name("point", &name[..16], 16).is_ok());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(validate_name("game", "bad\nname", 64).is_err());
        assert!(validate_name("game", "nul\0", 64).is_err());
    }
}
