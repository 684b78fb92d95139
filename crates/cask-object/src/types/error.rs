//! Store error types.

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
///
/// This layer never retries: the backend client retries idempotent transient
/// failures internally, and the non-idempotent steps (delete, conditional
/// copy) must not be replayed blindly. Each variant tells the caller which
/// step failed and, for rename, whether compensation ran.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Object or key not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied by the backend.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A caller-supplied argument was rejected before any backend call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Listing aborted mid-iteration; the partial page was discarded.
    #[error("listing under {prefix:?} failed: {source}")]
    Iteration {
        /// Full prefix that was being listed.
        prefix: String,
        #[source]
        source: object_store::Error,
    },

    /// Conditional copy refused because the destination key already holds an
    /// object. Source and destination are both unchanged.
    #[error("destination already exists: {dst}")]
    PreconditionFailed {
        /// Full destination key.
        dst: String,
    },

    /// Rename copy step failed for a reason other than the precondition.
    /// The source is untouched and no destination residue exists.
    #[error("copy {src} -> {dst} failed: {source}")]
    Copy {
        /// Full source key.
        src: String,
        /// Full destination key.
        dst: String,
        #[source]
        source: Box<StoreError>,
    },

    /// Source delete failed after a successful copy, and the fresh
    /// destination copy was removed again. The source still holds the only
    /// replica; retrying the rename is safe.
    #[error("copied {src} to {dst} but deleting the source failed (destination cleaned up): {source}")]
    DeleteAfterCopy {
        /// Full source key, still present.
        src: String,
        /// Full destination key, cleaned up.
        dst: String,
        #[source]
        source: Box<StoreError>,
    },

    /// Source delete and destination cleanup both failed: the object now
    /// exists under both keys and needs operator remediation. Not safe to
    /// blindly retry.
    #[error(
        "rename {src} -> {dst} left duplicate objects: \
         source delete failed ({delete}); destination cleanup failed ({cleanup})"
    )]
    Compensation {
        /// Full source key, still present.
        src: String,
        /// Full destination key, also present.
        dst: String,
        #[source]
        delete: Box<StoreError>,
        cleanup: Box<StoreError>,
    },

    /// Any other backend failure, surfaced unmodified.
    #[error("backend error: {0}")]
    Backend(object_store::Error),
}

impl StoreError {
    /// Whether this error is a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error means a rename destination already existed.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::PreconditionFailed { .. })
    }
}

impl From<object_store::Error> for StoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { ref path, .. } => Self::NotFound(path.clone()),
            object_store::Error::PermissionDenied { ref path, .. }
            | object_store::Error::Unauthenticated { ref path, .. } => {
                Self::PermissionDenied(path.clone())
            }
            _ => Self::Backend(err),
        }
    }
}
