//! Error types for the pagination registry and paginator lifecycle.

use thiserror::Error;

/// Errors raised while binding a paginator to a registry instance.
///
/// Out-of-range pages, empty collections and similar conditions are not
/// errors; they are expected while data is loading and are handled by
/// clamping in [`crate::paginator::correct`] and by empty windows from
/// [`crate::window::compute_window`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// No pagination state is registered under the requested id.
    #[error("there is no instance registered with id `{id}`")]
    UnboundInstance {
        /// The id that was looked up.
        id: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PaginationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_instance_message() {
        let err = PaginationError::UnboundInstance {
            id: "results".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "there is no instance registered with id `results`"
        );
    }
}
