//! Typed errors surfaced by the repository core.

/// Errors raised while normalizing a version string.
///
/// Repository lookups never catch these; they reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    /// The version string was empty or only whitespace.
    #[error("version string is empty")]
    Empty,

    /// The version string matched none of the supported formats.
    #[error("invalid version string \"{0}\"")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_input() {
        let err = VersionParseError::Invalid("foo.bar".into());
        assert_eq!(err.to_string(), "invalid version string \"foo.bar\"");
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(VersionParseError::Empty.to_string(), "version string is empty");
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = VersionParseError::Empty.into();
        assert!(err.downcast_ref::<VersionParseError>().is_some());
    }
}
