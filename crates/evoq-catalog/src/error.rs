//! Error types for the catalogue crate.

use thiserror::Error;

/// Errors produced by catalogue lookups and loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// No entry with this identifier.
    #[error("unknown molecule: {0}")]
    UnknownMolecule(String),

    /// Two entries share an identifier.
    #[error("duplicate molecule key: {0}")]
    DuplicateKey(String),

    /// The JSON table could not be decoded.
    #[error("invalid catalogue data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for catalogue operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
