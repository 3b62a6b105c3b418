//! Snap indicator: shows which source point is snapping and where to.

use super::{SnapCandidatePoint, SnappedPoint};
use seltrans_core::Shared;

pub trait SnapIndicator {
    fn set_source(&mut self, source: &SnapCandidatePoint);
    fn remove_source(&mut self);
    fn set_target(&mut self, target: &SnappedPoint);
    fn remove_target(&mut self);
}

/// Indicator that only remembers what it would show.
#[derive(Debug, Clone, Default)]
pub struct IndicatorState {
    pub source: Option<SnapCandidatePoint>,
    pub target: Option<SnappedPoint>,
}

impl SnapIndicator for IndicatorState {
    fn set_source(&mut self, source: &SnapCandidatePoint) {
        self.source = Some(*source);
    }

    fn remove_source(&mut self) {
        self.source = None;
    }

    fn set_target(&mut self, target: &SnappedPoint) {
        tracing::trace!(x = target.point.x, y = target.point.y, "snap target");
        self.target = Some(*target);
    }

    fn remove_target(&mut self) {
        self.target = None;
    }
}

impl<T: SnapIndicator> SnapIndicator for Shared<T> {
    fn set_source(&mut self, source: &SnapCandidatePoint) {
        self.borrow_mut().set_source(source)
    }

    fn remove_source(&mut self) {
        self.borrow_mut().remove_source()
    }

    fn set_target(&mut self, target: &SnappedPoint) {
        self.borrow_mut().set_target(target)
    }

    fn remove_target(&mut self) {
        self.borrow_mut().remove_target()
    }
}
