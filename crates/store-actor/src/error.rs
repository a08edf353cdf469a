//! # Store Errors
//!
//! Errors produced by the collection plumbing itself. Document-specific
//! failures travel inside [`StoreError::DocumentError`] and can be recovered
//! with [`StoreError::downcast_document`].

/// Errors that can occur while talking to a collection actor.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Document error: {0}")]
    DocumentError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the typed document error carried by `DocumentError`.
    ///
    /// Any other variant, or a document error of a different type, is handed
    /// back unchanged in `Err`.
    pub fn downcast_document<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::DocumentError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(StoreError::DocumentError(other)),
            },
            other => Err(other),
        }
    }
}
