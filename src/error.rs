//! Crate error type.

/// Errors surfaced to callers.
///
/// Per-route and per-itinerary feasibility failures are never errors — they
/// are absorbed where they occur (an invalid route is simply not a
/// candidate). Only whole-run problems end up here: unreadable or malformed
/// instance input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The instance text could not be parsed.
    #[error("malformed instance: {0}")]
    MalformedInstance(String),

    /// A parsed vertex index does not fit the declared vertex count.
    #[error("vertex {vertex} out of range for instance with {size} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// Declared vertex count.
        size: usize,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::MalformedInstance("expected vertex count".into());
        assert_eq!(e.to_string(), "malformed instance: expected vertex count");

        let e = Error::VertexOutOfRange { vertex: 7, size: 4 };
        assert_eq!(
            e.to_string(),
            "vertex 7 out of range for instance with 4 vertices"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}
