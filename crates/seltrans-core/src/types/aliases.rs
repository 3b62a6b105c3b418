//! Type aliases for commonly used shared-state types.
//!
//! The engine is single-threaded and event driven, so shared state is always
//! `Rc<RefCell<T>>` rather than a lock.
//!
//! ```rust,ignore
//! use seltrans_core::types::*;
//!
//! let item: Shared<DrawingItem> = shared(DrawingItem::rect("r1", rect));
//! item.borrow_mut().set_affine(affine);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Wraps a value in `Rc<RefCell<_>>`.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
