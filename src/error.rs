//! Error types for the preview pipeline and the organization directory.

use thiserror::Error;

/// Failures reported by a rendering surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface could not start its own initial load.
    #[error("Rendering surface failed to load: {0}")]
    LoadFailed(String),

    /// The surface markup the load was meant for is not present.
    #[error("Rendering surface not found: {0}")]
    NotFound(String),
}

/// Result type alias for organization directory operations.
pub type OrganizationResult<T> = Result<T, OrganizationError>;

/// Validation failures when registering an organization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrganizationError {
    #[error("Organization name can't be blank")]
    BlankName,

    #[error("Organization slug can't be blank")]
    BlankSlug,

    /// Slugs are lowercase letters, digits, `-` and `_`, starting with a letter or digit.
    #[error("Invalid organization slug: {0:?}")]
    InvalidSlug(String),

    #[error("Organization name has already been taken: {0}")]
    DuplicateName(String),

    #[error("Organization slug has already been taken: {0}")]
    DuplicateSlug(String),

    #[error("Organization id has already been taken: {0}")]
    DuplicateId(u64),
}
