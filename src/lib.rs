//! # SelTrans
//!
//! Interactive transformation of a selection of drawing items:
//! - Move, scale, stretch, skew and rotate by dragging handles
//! - Visual or geometric bounding boxes, with stroke-aware scaling
//! - Snapping of bounding-box corners and special points while dragging
//! - Rotation center editing and stamping of copies mid-drag
//!
//! ## Architecture
//!
//! SelTrans is organized as a workspace with multiple crates:
//!
//! 1. **seltrans-core** - Geometry (points, rects, affines), errors, units
//! 2. **seltrans-settings** - Transform and snapping preferences, config files
//! 3. **seltrans-designer** - The transform engine, snapping and scene replay
//! 4. **seltrans** - Command-line driver that replays scripted drags

pub use seltrans_core::{Affine, BBoxType, Dim2, Error, Point, Rect, Result, Scale, ShowMode};
pub use seltrans_designer::{
    Desktop, Drawing, DrawingItem, Handle, HandleKind, HandleState, Modifiers, PointSnapper,
    ReplayReport, Scene, SelectionTransformer, Step, UndoLabel,
};
pub use seltrans_settings::{Config, SnapSettings, TransformPreferences};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (defaults to `info`)
/// - Pretty console output on stderr, or one JSON object per line
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the report, logs go to stderr
    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
