//! Redirect table errors.

/// Error returned when a redirect table fails validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RedirectError {
    /// Source path is empty, not site-absolute, or carries a query or
    /// fragment.
    #[error("Invalid redirect source {from:?}: must be a path starting with '/'")]
    InvalidSource {
        /// Offending source path.
        from: String,
    },

    /// Target path is empty.
    #[error("Redirect from {from} has an empty target")]
    EmptyTarget {
        /// Source path of the entry.
        from: String,
    },

    /// Entry redirects a path to itself.
    #[error("Redirect from {from} points to itself")]
    SelfLoop {
        /// Source path of the entry.
        from: String,
    },

    /// Same source path registered twice with different targets.
    #[error("Redirect from {from} declared twice: {first} and {second}")]
    ConflictingDuplicate {
        /// Shared source path.
        from: String,
        /// Target of the earlier entry.
        first: String,
        /// Target of the later entry.
        second: String,
    },

    /// Following redirects from some path leads back to it.
    #[error("Redirect cycle: {}", .chain.join(" -> "))]
    Cycle {
        /// Hops of the cycle, first path repeated at the end.
        chain: Vec<String>,
    },
}
