//! # SelTrans Core
//!
//! Core types, traits, and utilities for the selection transformation engine.
//! Provides the geometry primitives (points, rectangles, affines), the shared
//! domain enums and the error taxonomy used by the other crates.

pub mod data;
pub mod error;
pub mod geometry;
pub mod types;
pub mod units;

pub use data::{BBoxType, ShowMode};

pub use error::{Error, Result, TransformError};

pub use geometry::{Affine, Dim2, Point, Rect, Scale};

// Re-export type aliases for convenience
pub use types::{shared, Shared, SharedVec};

pub use units::DisplayUnit;
