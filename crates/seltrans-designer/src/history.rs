//! Undo history entries produced by committed transformations.

use seltrans_core::Shared;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of a committed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndoLabel {
    Move,
    Scale,
    Rotate,
    Skew,
    SetCenter,
    ResetCenter,
    Stamp,
}

impl UndoLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            UndoLabel::Move => "Move",
            UndoLabel::Scale => "Scale",
            UndoLabel::Rotate => "Rotate",
            UndoLabel::Skew => "Skew",
            UndoLabel::SetCenter => "Set center",
            UndoLabel::ResetCenter => "Reset center",
            UndoLabel::Stamp => "Stamp",
        }
    }
}

impl fmt::Display for UndoLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one commit per completed user action.
pub trait UndoRecorder {
    fn commit(&mut self, label: UndoLabel);
}

/// In-memory list of commits.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: Vec<UndoLabel>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[UndoLabel] {
        &self.entries
    }

    pub fn last(&self) -> Option<UndoLabel> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl UndoRecorder for UndoHistory {
    fn commit(&mut self, label: UndoLabel) {
        tracing::debug!(%label, "commit");
        self.entries.push(label);
    }
}

impl<T: UndoRecorder> UndoRecorder for Shared<T> {
    fn commit(&mut self, label: UndoLabel) {
        self.borrow_mut().commit(label)
    }
}
