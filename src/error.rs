//! Error types for paragraph reconstruction.
//!
//! Layout and merge algorithms do not fail on well-formed geometry. The
//! variants here cover broken internal invariants and the I/O done by the
//! command-line front end.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing paragraphs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An internal layout invariant was broken. Fatal to the current document.
    #[error("Layout invariant violated: {0}")]
    InvariantViolation(String),

    /// A block carried unusable geometry. Reported as a diagnostic; the block is dropped.
    #[error("Malformed geometry in block {block}: {reason}")]
    MalformedGeometry {
        /// Source block number
        block: u32,
        /// What was wrong with the bbox
        reason: String,
    },

    /// Invalid caller-supplied argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_message() {
        let err = Error::InvariantViolation("open columns 1 and 2 overlap".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("invariant"));
        assert!(msg.contains("open columns 1 and 2 overlap"));
    }

    #[test]
    fn test_malformed_geometry_message() {
        let err = Error::MalformedGeometry {
            block: 7,
            reason: "missing bbox".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("block 7"));
        assert!(msg.contains("missing bbox"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
