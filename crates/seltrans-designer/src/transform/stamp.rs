//! Stamping: leave a copy of the selection at its current transform.

use super::SelectionTransformer;
use crate::history::UndoLabel;
use crate::selection::SharedItem;
use seltrans_core::{Result, ShowMode};

impl SelectionTransformer {
    /// Duplicates every selected item in place, as currently transformed.
    ///
    /// Items are copied in document order. During a drag the order is
    /// computed once and reused for every stamp of that drag. Returns the
    /// number of copies made.
    pub fn stamp(&mut self) -> Result<usize> {
        let fixup = !self.session.grabbed;
        if fixup {
            self.session.stamp_cache.clear();
        }
        if self.empty {
            return Ok(0);
        }

        if self.session.stamp_cache.is_empty() {
            self.session.stamp_cache = self.items_in_document_order();
        }
        let items = self.session.stamp_cache.clone();

        let outline = self.prefs().show == ShowMode::Outline;
        let current = self.session.current_relative_affine;
        let center = self.center;

        let mut copies = 0;
        for original in &items {
            let Some(copy) = self.desktop.document.duplicate_in_place(original) else {
                tracing::warn!(id = original.borrow().id(), "could not duplicate item for stamping");
                continue;
            };
            let mut copy = copy.borrow_mut();
            if outline {
                let affine = original.borrow().affine() * current;
                copy.set_affine(affine);
            }
            if let (true, Some(center)) = (copy.is_center_set(), center) {
                copy.set_center(center * current);
            }
            copy.update_repr();
            copies += 1;
        }

        self.desktop.undo.commit(UndoLabel::Stamp);
        tracing::debug!(copies, "stamped selection");

        if fixup {
            self.session.stamp_cache.clear();
        }
        Ok(copies)
    }

    fn items_in_document_order(&self) -> Vec<SharedItem> {
        let document = self.desktop.document.as_ref();
        let mut items: Vec<(usize, SharedItem)> = self
            .desktop
            .selection
            .items()
            .iter()
            .filter_map(|item| document.position(item).map(|pos| (pos, item.clone())))
            .collect();
        items.sort_by_key(|(pos, _)| *pos);
        items.into_iter().map(|(_, item)| item).collect()
    }
}
