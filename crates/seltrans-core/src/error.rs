//! Error handling for SelTrans
//!
//! Provides the error types raised by the transformation engine:
//! - Transform errors (session protocol and geometry)
//! - A unified `Error` returned by engine operations
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Transform error type
///
/// Represents violations of the grab/transform/ungrab protocol and
/// geometry that cannot produce a meaningful affine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// `grab` was called while a session is already active
    #[error("Transform session already grabbed")]
    AlreadyGrabbed,

    /// A session operation was called without a preceding `grab`
    #[error("No transform session is grabbed")]
    NotGrabbed,

    /// The selection has no items or no bounding box
    #[error("Selection is empty")]
    EmptySelection,

    /// The geometry is too degenerate to derive a transform from
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What made the geometry unusable.
        reason: String,
    },

    /// The transform should be anchored at the center but none can be resolved
    #[error("No rotation center could be resolved")]
    NoCenter,

    /// A snapshotted item is no longer part of the document
    #[error("Item {id} is no longer attached to the document")]
    StaleItem {
        /// Identifier of the detached item.
        id: String,
    },

    /// The document root cannot be transformed
    #[error("Cannot transform an embedded SVG root ({id})")]
    RootItem {
        /// Identifier of the root item.
        id: String,
    },
}

impl TransformError {
    /// Create a degenerate-geometry error from a reason
    pub fn degenerate(reason: impl Into<String>) -> Self {
        TransformError::DegenerateGeometry {
            reason: reason.into(),
        }
    }
}

/// Unified error type
#[derive(Error, Debug)]
pub enum Error {
    /// Transform error
    #[error(transparent)]
    Transform(#[from] TransformError),

}

impl Error {
    /// Check if this is a protocol violation (grab/ungrab misuse)
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Error::Transform(TransformError::AlreadyGrabbed | TransformError::NotGrabbed)
        )
    }

    /// Check if this is a transform error
    pub fn is_transform_error(&self) -> bool {
        matches!(self, Error::Transform(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
